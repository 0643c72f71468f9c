// Model backend trait: the swap-ready abstraction.
//
// A backend takes the text under review (plus optional caller context) and
// returns a quality judgment. Classification against the threshold happens
// in the filter service, not here, so every backend shares one cutoff.

use async_trait::async_trait;
use thiserror::Error;

/// A backend's verdict on a single piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Judgment {
    /// Quality score from 0.0 (pure brain rot) to 1.0 (high quality)
    pub score: f64,
    /// Human-readable explanation of the score
    pub reasoning: String,
}

/// Ways a backend call can fail. Each maps to a distinct HTTP status so
/// callers can tell an outage from a slow model from a confused one.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("model backend unavailable: {0}")]
    Unavailable(String),
    #[error("model backend timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("model backend returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Trait for scoring text quality. Implementations must be async because
/// real providers sit behind an HTTP or RPC boundary.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Identifier of the model behind this backend (e.g. "llama3").
    fn model(&self) -> &str;

    /// Judge a single text. `context` is optional caller guidance.
    async fn evaluate(&self, text: &str, context: Option<&str>) -> Result<Judgment, BackendError>;
}
