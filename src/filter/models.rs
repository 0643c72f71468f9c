// Filter request/response types and boundary validation.
//
// Requests are validated from the raw JSON value rather than through a
// derived Deserialize, so every offending field can be reported at once
// with a field-level message.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A validated request to classify a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterRequest {
    /// The content to evaluate. Never empty.
    pub text: String,
    /// Optional auxiliary guidance for the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// The service's verdict on a FilterRequest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterResponse {
    /// Quality score in [0.0, 1.0]; higher means less brain rot
    pub score: f64,
    /// True when the score falls below the configured threshold
    pub is_brain_rot: bool,
    pub reasoning: String,
}

/// One field that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl FilterRequest {
    /// Validate a decoded JSON body.
    ///
    /// `text` must be a non-empty string; `context` may be absent, null, or a
    /// string. Unknown fields are ignored.
    pub fn from_json(body: &Value) -> Result<Self, Vec<FieldError>> {
        let Some(object) = body.as_object() else {
            return Err(vec![FieldError::new(
                "body",
                "request body must be a JSON object",
            )]);
        };

        let mut errors = Vec::new();

        let text = match object.get("text") {
            None | Some(Value::Null) => {
                errors.push(FieldError::new("text", "field required"));
                None
            }
            Some(Value::String(s)) if s.is_empty() => {
                errors.push(FieldError::new("text", "must not be empty"));
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                errors.push(FieldError::new("text", "must be a string"));
                None
            }
        };

        let context = match object.get("context") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                errors.push(FieldError::new("context", "must be a string or null"));
                None
            }
        };

        match text {
            Some(text) if errors.is_empty() => Ok(Self { text, context }),
            _ => Err(errors),
        }
    }
}
