// Model backends: trait-based abstraction for swappable quality scorers.
//
// The ModelBackend trait defines the interface. PlaceholderBackend returns a
// fixed judgment until a real model is wired in; OllamaBackend asks a local
// Ollama server running a language model. The HTTP layer only ever talks to
// the trait, so swapping backends never touches request handling.

pub mod ollama;
pub mod placeholder;
pub mod traits;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::{BackendKind, Config};

/// Create a model backend based on the configured kind.
pub fn create_backend(config: &Config) -> Result<Arc<dyn traits::ModelBackend>> {
    match config.backend {
        BackendKind::Placeholder => {
            info!(model = %config.model, "Using placeholder model backend");
            Ok(Arc::new(placeholder::PlaceholderBackend::new(&config.model)))
        }
        BackendKind::Ollama => {
            info!(model = %config.model, url = %config.ollama_url, "Using Ollama model backend");
            let backend = ollama::OllamaBackend::new(&config.ollama_url, &config.model)?;
            Ok(Arc::new(backend))
        }
    }
}
