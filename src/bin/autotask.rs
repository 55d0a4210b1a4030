//! Autotask API CLI binary.
//!
//! A command-line interface for querying the Autotask PSA API.

use autotask::cli::{Cli, Command, EntityType, FilterArgs};
use autotask::output::PrettyPrint;
use autotask::{AutotaskClient, Company, Contact, Entity, Get, Query, Resource, Ticket};
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    if let Command::Schema = cli.command {
        return match serde_json::to_string_pretty(&Query::schema()) {
            Ok(schema) => {
                println!("{schema}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let client = match AutotaskClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!(
                "Hint: Set AUTOTASK_USERNAME, AUTOTASK_SECRET and AUTOTASK_INTEGRATION_CODE"
            );
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &AutotaskClient, cli: Cli) -> autotask::Result<()> {
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, id, cli.json).await,
        Command::Query {
            entity,
            filters,
            limit,
            all,
        } => handle_query(client, entity, &filters, limit, all, cli.json).await,
        Command::Count { entity, filters } => handle_count(client, entity, &filters).await,
        Command::Schema => Ok(()),
    }
}

async fn handle_get(
    client: &AutotaskClient,
    entity: EntityType,
    id: i64,
    json: bool,
) -> autotask::Result<()> {
    match entity {
        EntityType::Ticket => output_single(&Ticket::get(client, id).await?, json),
        EntityType::Company => output_single(&Company::get(client, id).await?, json),
        EntityType::Contact => output_single(&Contact::get(client, id).await?, json),
        EntityType::Resource => output_single(&Resource::get(client, id).await?, json),
    }
}

async fn handle_query(
    client: &AutotaskClient,
    entity: EntityType,
    filters: &FilterArgs,
    limit: Option<u32>,
    all: bool,
    json: bool,
) -> autotask::Result<()> {
    match entity {
        EntityType::Ticket => {
            let items = fetch::<Ticket>(client, filters, limit, all).await?;
            output_items(&items, json, |i| TicketRow::from(i))
        }
        EntityType::Company => {
            let items = fetch::<Company>(client, filters, limit, all).await?;
            output_items(&items, json, |i| CompanyRow::from(i))
        }
        EntityType::Contact => {
            let items = fetch::<Contact>(client, filters, limit, all).await?;
            output_items(&items, json, |i| ContactRow::from(i))
        }
        EntityType::Resource => {
            let items = fetch::<Resource>(client, filters, limit, all).await?;
            output_items(&items, json, |i| ResourceRow::from(i))
        }
    }
}

async fn handle_count(
    client: &AutotaskClient,
    entity: EntityType,
    filters: &FilterArgs,
) -> autotask::Result<()> {
    let count = match entity {
        EntityType::Ticket => count::<Ticket>(client, filters).await?,
        EntityType::Company => count::<Company>(client, filters).await?,
        EntityType::Contact => count::<Contact>(client, filters).await?,
        EntityType::Resource => count::<Resource>(client, filters).await?,
    };
    println!("{count}");
    Ok(())
}

async fn fetch<T: Entity>(
    client: &AutotaskClient,
    filters: &FilterArgs,
    limit: Option<u32>,
    all: bool,
) -> autotask::Result<Vec<T>> {
    let mut query = T::query();
    if let Some(limit) = limit {
        query.with_limit(limit)?;
    }
    filters.apply(&mut query)?;

    if all {
        query.paginate(client).await?.collect_all(client).await
    } else {
        Ok(query.execute(client).await?.items)
    }
}

async fn count<T: Entity>(client: &AutotaskClient, filters: &FilterArgs) -> autotask::Result<u64> {
    let mut query = T::query();
    filters.apply(&mut query)?;
    query.count(client).await
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> autotask::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_items<T, R, F>(items: &[T], json: bool, to_row: F) -> autotask::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} record(s)", items.len());
    }
    Ok(())
}

// Table row types for non-JSON output

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[derive(Tabled)]
struct TicketRow {
    id: i64,
    number: String,
    title: String,
    status: String,
    priority: String,
}

impl From<&Ticket> for TicketRow {
    fn from(t: &Ticket) -> Self {
        Self {
            id: t.id,
            number: t.ticket_number.clone().unwrap_or_default(),
            title: t.title.clone(),
            status: opt(t.status),
            priority: opt(t.priority),
        }
    }
}

#[derive(Tabled)]
struct CompanyRow {
    id: i64,
    name: String,
    active: bool,
    phone: String,
}

impl From<&Company> for CompanyRow {
    fn from(c: &Company) -> Self {
        Self {
            id: c.id,
            name: c.company_name.clone(),
            active: c.is_active,
            phone: c.phone.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct ContactRow {
    id: i64,
    name: String,
    email: String,
    company: String,
}

impl From<&Contact> for ContactRow {
    fn from(c: &Contact) -> Self {
        Self {
            id: c.id,
            name: c.full_name(),
            email: c.email_address.clone().unwrap_or_default(),
            company: opt(c.company_id),
        }
    }
}

#[derive(Tabled)]
struct ResourceRow {
    id: i64,
    name: String,
    email: String,
    active: bool,
}

impl From<&Resource> for ResourceRow {
    fn from(r: &Resource) -> Self {
        Self {
            id: r.id,
            name: r.display_name(),
            email: r.email.clone().unwrap_or_default(),
            active: r.is_active,
        }
    }
}
