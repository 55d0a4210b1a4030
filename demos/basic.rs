//! Basic example demonstrating the Autotask API client.
//!
//! Run with:
//! ```
//! AUTOTASK_USERNAME=api-user@example.com AUTOTASK_SECRET=... \
//!     AUTOTASK_INTEGRATION_CODE=... cargo run --example basic
//! ```

use autotask::{AutotaskClient, Company, Entity, Field, Get, Ticket};

#[tokio::main]
async fn main() -> autotask::Result<()> {
    // Set RUST_LOG=autotask=debug to see the search payloads
    tracing_subscriber::fmt::init();

    println!("Creating Autotask client...");
    let client = AutotaskClient::from_env()?;

    // Find the zone that hosts this API user and switch to it
    let username = std::env::var("AUTOTASK_USERNAME").unwrap_or_default();
    let zone = client.zone_information(&username).await?;
    let client = client.for_zone(&zone)?;
    println!(
        "Connected to: {} ({})",
        client.base_url(),
        zone.zone_name.as_deref().unwrap_or("unknown zone")
    );

    // Open tickets that are urgent or high priority
    println!("\n--- Open high-priority tickets ---");
    let mut query = Ticket::query();
    query
        .with_limit(10)?
        .where_("status", "noteq", 5)?
        .or_where_group(|g| g.where_("priority", "eq", 1)?.or_where("priority", "eq", 2))?;

    let total = query.count(&client).await?;
    let page = query.execute(&client).await?;
    println!("Showing {} of {} tickets", page.len(), total);

    for ticket in &page {
        println!(
            "  - {} {}",
            ticket.ticket_number.as_deref().unwrap_or("-"),
            ticket.title
        );
    }

    // Look up the company of the first ticket
    if let Some(company_id) = page.items.first().and_then(|t| t.company_id) {
        println!("\n--- Company details ---");
        let company = Company::get(&client, company_id).await?;
        println!("Company: {}", company.company_name);
        println!("  Phone: {}", company.phone.as_deref().unwrap_or("-"));
        if let Some(address) = company.address() {
            println!("  Address: {}", address);
        }
    }

    // Active companies with a user-defined field set
    println!("\n--- Companies by tier ---");
    let mut query = Company::query();
    query
        .where_("isActive", "eq", true)?
        .where_unary(Field::udf("Tier"), "exist")?;

    let companies = query.paginate(&client).await?.collect_all(&client).await?;
    for company in &companies {
        println!(
            "  - {} [{}]",
            company.company_name,
            company.udf("Tier").unwrap_or("-")
        );
    }

    println!("\nDone!");
    Ok(())
}
