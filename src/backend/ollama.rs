// Ollama model backend.
//
// Sends the text to a local Ollama server's generate endpoint with JSON mode
// enabled and asks the model for a `{score, reasoning}` object. Ollama wraps
// the model's output in its own envelope, so parsing happens in two steps:
// the envelope first, then the JSON string inside `response`.
//
// API docs: https://github.com/ollama/ollama/blob/main/docs/api.md#generate-a-completion

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::traits::{BackendError, Judgment, ModelBackend};
use crate::output::truncate_chars;

/// Instructions given to the model for every request.
pub const SYSTEM_PROMPT: &str = "You are a content quality rater. \
Rate the text you are given for how much lasting value it offers a reader. \
Low-effort, engagement-bait, incoherent or meme-spam content is \"brain rot\" and scores near 0.0. \
Informative, thoughtful or genuinely creative content scores near 1.0. \
Respond only with a JSON object of the form \
{\"score\": <number between 0.0 and 1.0>, \"reasoning\": \"<one or two sentences>\"}.";

/// Ollama-backed quality scorer.
pub struct OllamaBackend {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaBackend {
    /// Create a backend pointing at the given Ollama base URL
    /// (e.g. `http://localhost:11434`).
    pub fn new(base_url: &str, model: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("brainrot/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl ModelBackend for OllamaBackend {
    fn model(&self) -> &str {
        &self.model
    }

    async fn evaluate(&self, text: &str, context: Option<&str>) -> Result<Judgment, BackendError> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model: &self.model,
            system: build_system_prompt(context),
            prompt: text,
            stream: false,
            format: "json",
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, url = %url, "Ollama request failed");
                BackendError::Unavailable(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Unavailable(format!("Ollama returned {status}: {body}")));
        }

        let envelope: GenerateResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(format!("bad Ollama envelope: {e}")))?;

        let judgment = parse_judgment(&envelope.response)?;

        debug!(
            score = judgment.score,
            model = %self.model,
            text_preview = %truncate_chars(text, 50),
            "Scored text"
        );

        Ok(judgment)
    }
}

/// Combine the fixed rating instructions with optional caller guidance.
pub fn build_system_prompt(context: Option<&str>) -> String {
    match context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(extra) => format!("{SYSTEM_PROMPT}\n\nAdditional guidance from the caller:\n{extra}"),
        None => SYSTEM_PROMPT.to_string(),
    }
}

/// Parse the model's JSON answer into a judgment.
///
/// Range and emptiness checks live in the filter service so they apply to
/// every backend; this only rejects answers that aren't the right shape.
pub fn parse_judgment(raw: &str) -> Result<Judgment, BackendError> {
    let answer: ModelAnswer = serde_json::from_str(raw.trim()).map_err(|e| {
        BackendError::InvalidResponse(format!(
            "model answer is not a score object ({e}): {}",
            truncate_chars(raw, 120)
        ))
    })?;

    Ok(Judgment {
        score: answer.score,
        reasoning: answer.reasoning.trim().to_string(),
    })
}

// --- Ollama API request/response types ---

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    system: String,
    prompt: &'a str,
    stream: bool,
    format: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct ModelAnswer {
    score: f64,
    #[serde(default)]
    reasoning: String,
}
