//! Autotask API client.
//!
//! Low-level HTTP client that handles authentication headers and raw
//! requests. Queries and entity lookups are built on top of it.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AutotaskError, Result};

const DEFAULT_API_URL: &str = "https://webservices.autotask.net/ATServicesRest/V1.0/";
const API_VERSION_PATH: &str = "V1.0/";
const USER_AGENT: &str = concat!("autotask/", env!("CARGO_PKG_VERSION"));

/// API user credentials sent with every request.
#[derive(Clone)]
pub struct Credentials {
    /// API user name (an email address).
    pub username: String,
    /// API user secret.
    pub secret: String,
    /// Tracking identifier of the integration.
    pub integration_code: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        secret: impl Into<String>,
        integration_code: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
            integration_code: integration_code.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Zone lookup result for an API user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneInformation {
    /// Display name of the zone.
    #[serde(default)]
    pub zone_name: Option<String>,
    /// Root URL of the zone's REST service, without the API version.
    pub url: String,
    /// Web UI URL of the zone.
    #[serde(default)]
    pub web_url: Option<String>,
    /// Numeric zone identifier.
    #[serde(default)]
    pub ci: Option<i64>,
}

impl ZoneInformation {
    /// Versioned REST base URL for this zone.
    pub fn rest_url(&self) -> String {
        if self.url.ends_with('/') {
            format!("{}{API_VERSION_PATH}", self.url)
        } else {
            format!("{}/{API_VERSION_PATH}", self.url)
        }
    }
}

/// Low-level Autotask API client.
///
/// Handles authentication and HTTP requests. Entity queries are built with
/// [`QueryBuilder`](crate::QueryBuilder) and executed against this client.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use autotask::{AutotaskClient, Credentials};
///
/// # async fn example() -> autotask::Result<()> {
/// // Create from environment variables
/// let client = AutotaskClient::from_env()?;
///
/// // Or configure manually
/// let client = AutotaskClient::new(
///     Credentials::new("api-user@example.com", "secret", "INTEGRATION-CODE"),
///     "https://webservices5.autotask.net/ATServicesRest/V1.0/",
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AutotaskClient {
    http: Client,
    base_url: Arc<Url>,
    credentials: Arc<Credentials>,
}

impl std::fmt::Debug for AutotaskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutotaskClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl AutotaskClient {
    /// Create a client from environment variables.
    ///
    /// Uses `AUTOTASK_USERNAME`, `AUTOTASK_SECRET` and
    /// `AUTOTASK_INTEGRATION_CODE` for authentication and optionally
    /// `AUTOTASK_API_URL` for the zone base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if any credential variable is not set.
    pub fn from_env() -> Result<Self> {
        let credentials = Credentials::new(
            require_env("AUTOTASK_USERNAME")?,
            require_env("AUTOTASK_SECRET")?,
            require_env("AUTOTASK_INTEGRATION_CODE")?,
        );

        let base_url =
            env::var("AUTOTASK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(credentials, &base_url)
    }

    /// Create a new client with the provided credentials and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(credentials: Credentials, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(AutotaskError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            credentials: Arc::new(credentials),
        })
    }

    /// A client with the same credentials pointed at another zone.
    pub fn for_zone(&self, zone: &ZoneInformation) -> Result<Self> {
        let base_url = Url::parse(&zone.rest_url())?;
        Ok(Self {
            http: self.http.clone(),
            base_url: Arc::new(base_url),
            credentials: Arc::clone(&self.credentials),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Look up which zone hosts an API user.
    #[tracing::instrument(skip(self))]
    pub async fn zone_information(&self, username: &str) -> Result<ZoneInformation> {
        let response = self
            .get_with_query("zoneInformation", &[("user", username)])
            .await?;
        response.json().await.map_err(AutotaskError::HttpError)
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;
        self.send(self.authorized(self.http.get(url))).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;
        self.send(self.authorized(self.http.get(url).query(query)))
            .await
    }

    /// Make a GET request to a URL handed out by the server, such as a
    /// `nextPageUrl`. Relative URLs resolve against the base URL.
    ///
    /// Credentials are only sent to the base URL's origin; an absolute URL
    /// on any other origin is an `InvalidArgument` error and no request is
    /// made.
    #[tracing::instrument(skip(self))]
    pub async fn get_url(&self, url: &str) -> Result<Response> {
        let url = self.resolve_url(url)?;
        self.send(self.authorized(self.http.get(url))).await
    }

    fn resolve_url(&self, url: &str) -> Result<Url> {
        let url = match Url::parse(url) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => self.base_url.join(url)?,
            Err(e) => return Err(e.into()),
        };
        if url.origin() != self.base_url.origin() {
            tracing::warn!(%url, base_url = %self.base_url, "Refusing cross-origin URL");
            return Err(AutotaskError::InvalidArgument(format!(
                "URL '{url}' is not on the API origin '{}'",
                self.base_url.origin().ascii_serialization()
            )));
        }
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("ApiIntegrationCode", &self.credentials.integration_code)
            .header("UserName", &self.credentials.username)
            .header("Secret", &self.credentials.secret)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(AutotaskError::HttpError)?;
        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(AutotaskError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        tracing::debug!(status = status.as_u16(), %message, "request failed");
        Err(AutotaskError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            // Autotask reports failures as {"errors": ["..."]}
            if let Some(errors) = json.get("errors").and_then(|e| e.as_array()) {
                let messages: Vec<&str> = errors.iter().filter_map(|e| e.as_str()).collect();
                if !messages.is_empty() {
                    return messages.join("; ");
                }
            }
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

fn require_env(name: &str) -> Result<String> {
    env::var(name)
        .map_err(|_| AutotaskError::ConfigMissing(format!("{name} environment variable not set")))
}
