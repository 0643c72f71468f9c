// Placeholder backend: returns the same judgment for every input.
//
// Stands in for real inference so the service contract can be exercised
// end to end. It never fails and ignores both text and context.

use async_trait::async_trait;

use super::traits::{BackendError, Judgment, ModelBackend};

pub const PLACEHOLDER_SCORE: f64 = 0.95;
pub const PLACEHOLDER_REASONING: &str = "Placeholder: Content seems high quality.";

pub struct PlaceholderBackend {
    model: String,
}

impl PlaceholderBackend {
    /// `model` is only reported, never invoked.
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl ModelBackend for PlaceholderBackend {
    fn model(&self) -> &str {
        &self.model
    }

    async fn evaluate(
        &self,
        _text: &str,
        _context: Option<&str>,
    ) -> Result<Judgment, BackendError> {
        Ok(Judgment {
            score: PLACEHOLDER_SCORE,
            reasoning: PLACEHOLDER_REASONING.to_string(),
        })
    }
}
