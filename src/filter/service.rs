// Filter service: marshals a validated request into a backend call and the
// backend's judgment back into a FilterResponse.
//
// The service holds no mutable state: one instance is built at startup and
// shared by every request. Each call is bounded by the configured timeout so
// a stuck backend surfaces as an error instead of a hung request.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::models::{FilterRequest, FilterResponse};
use crate::backend::traits::{BackendError, Judgment, ModelBackend};
use crate::config::Config;

pub struct FilterService {
    backend: Arc<dyn ModelBackend>,
    threshold: f64,
    timeout: Duration,
}

impl FilterService {
    pub fn new(backend: Arc<dyn ModelBackend>, threshold: f64, timeout: Duration) -> Self {
        Self {
            backend,
            threshold,
            timeout,
        }
    }

    /// Build a service from config around an already-created backend.
    pub fn from_config(config: &Config, backend: Arc<dyn ModelBackend>) -> Self {
        Self::new(backend, config.threshold, config.backend_timeout)
    }

    /// Identifier of the model doing the scoring.
    pub fn model(&self) -> &str {
        self.backend.model()
    }

    /// Evaluate a request. Backend failures are returned, never papered over.
    pub async fn filter(&self, request: &FilterRequest) -> Result<FilterResponse, BackendError> {
        let call = self
            .backend
            .evaluate(&request.text, request.context.as_deref());

        let judgment = match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(timeout = ?self.timeout, model = %self.model(), "Backend call timed out");
                return Err(BackendError::Timeout(self.timeout));
            }
        };

        let judgment = check_judgment(judgment)?;
        let is_brain_rot = classify(judgment.score, self.threshold);

        debug!(
            score = judgment.score,
            is_brain_rot,
            threshold = self.threshold,
            "Classified text"
        );

        Ok(FilterResponse {
            score: judgment.score,
            is_brain_rot,
            reasoning: judgment.reasoning,
        })
    }
}

/// Scores strictly below the threshold are brain rot.
pub fn classify(score: f64, threshold: f64) -> bool {
    score < threshold
}

/// Reject judgments that would break the response contract.
fn check_judgment(judgment: Judgment) -> Result<Judgment, BackendError> {
    if !judgment.score.is_finite() || !(0.0..=1.0).contains(&judgment.score) {
        return Err(BackendError::InvalidResponse(format!(
            "score {} is outside [0.0, 1.0]",
            judgment.score
        )));
    }
    if judgment.reasoning.trim().is_empty() {
        return Err(BackendError::InvalidResponse("reasoning is empty".to_string()));
    }
    Ok(judgment)
}
