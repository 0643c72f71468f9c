// HTTP client for a running filter service.
//
// Used by the `check` and `status` CLI commands, and by anything else in Rust
// that wants to ask the service for a verdict. Error statuses are surfaced
// with the server's own error message rather than swallowed.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::filter::models::{FieldError, FilterRequest, FilterResponse};
use crate::web::handlers::status::StatusResponse;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

/// Client for the filter service's HTTP API.
pub struct FilterClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    fields: Vec<FieldError>,
}

impl ErrorBody {
    /// The server's message, followed by any `field: message` detail.
    fn describe(self) -> String {
        if self.fields.is_empty() {
            return self.error;
        }
        let detail: Vec<String> = self
            .fields
            .iter()
            .map(|f| format!("{}: {}", f.field, f.message))
            .collect();
        format!("{} ({})", self.error, detail.join(", "))
    }
}

impl FilterClient {
    /// Create a client pointing at the given base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("brainrot/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /: the service's status and model identifier.
    pub async fn status(&self) -> Result<StatusResponse> {
        let url = format!("{}/", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach filter service at {}", self.base_url))?;

        check_status(response)
            .await?
            .json::<StatusResponse>()
            .await
            .context("Failed to parse status response")
    }

    /// POST /filter: classify `text`, with optional guidance in `context`.
    pub async fn filter(&self, text: &str, context: Option<&str>) -> Result<FilterResponse> {
        let url = format!("{}/filter", self.base_url);
        let request = FilterRequest {
            text: text.to_string(),
            context: context.map(str::to_string),
        };

        debug!(url = %url, "Sending filter request");
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Failed to reach filter service at {}", self.base_url))?;

        check_status(response)
            .await?
            .json::<FilterResponse>()
            .await
            .context("Failed to parse filter response")
    }
}

/// Turn a non-success response into an error carrying the server's message.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(ErrorBody::describe)
        .unwrap_or(body);
    anyhow::bail!("Filter service returned {}: {}", status, message)
}
