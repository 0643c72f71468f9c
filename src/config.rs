use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MODEL: &str = "llama3";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
/// Scores below this are classified as brain rot.
pub const DEFAULT_THRESHOLD: f64 = 0.5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which model backend evaluates filter requests.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendKind {
    /// Fixed, input-independent judgment (default), no model needed
    Placeholder,
    /// Local Ollama server, requires a pulled model (e.g. `ollama pull llama3`)
    Ollama,
}

impl BackendKind {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "placeholder" => Ok(Self::Placeholder),
            "ollama" => Ok(Self::Ollama),
            other => anyhow::bail!(
                "Unknown BRAINROT_BACKEND '{other}'. Expected 'placeholder' or 'ollama'."
            ),
        }
    }
}

/// Central configuration loaded from environment variables.
///
/// Built once at process start and shared read-only with every request.
/// The .env file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    pub port: u16,
    pub backend: BackendKind,
    /// Backend identifier reported by `GET /` and sent to the model server
    pub model: String,
    /// `is_brain_rot` is true when a score falls below this value
    pub threshold: f64,
    /// Upper bound on a single backend call
    pub backend_timeout: Duration,
    pub ollama_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            backend: BackendKind::Placeholder,
            model: DEFAULT_MODEL.to_string(),
            threshold: DEFAULT_THRESHOLD,
            backend_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable has a default, so an empty environment yields the
    /// placeholder service on port 8000.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. `load` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let backend = match lookup("BRAINROT_BACKEND") {
            Some(value) => BackendKind::parse(&value)?,
            None => defaults.backend,
        };

        let port = match lookup("BRAINROT_PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .with_context(|| format!("BRAINROT_PORT '{value}' is not a valid port"))?,
            None => defaults.port,
        };

        let threshold = match lookup("BRAINROT_THRESHOLD") {
            Some(value) => value
                .trim()
                .parse::<f64>()
                .with_context(|| format!("BRAINROT_THRESHOLD '{value}' is not a number"))?,
            None => defaults.threshold,
        };

        let backend_timeout = match lookup("BRAINROT_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(value.trim().parse::<u64>().with_context(
                || format!("BRAINROT_TIMEOUT_SECS '{value}' is not a whole number of seconds"),
            )?),
            None => defaults.backend_timeout,
        };

        let config = Self {
            bind: lookup("BRAINROT_BIND").unwrap_or(defaults.bind),
            port,
            backend,
            model: lookup("BRAINROT_MODEL").unwrap_or(defaults.model),
            threshold,
            backend_timeout,
            ollama_url: lookup("OLLAMA_URL").unwrap_or(defaults.ollama_url),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that the type system can't express.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            anyhow::bail!(
                "BRAINROT_THRESHOLD must be between 0.0 and 1.0, got {}",
                self.threshold
            );
        }
        if self.backend_timeout.is_zero() {
            anyhow::bail!("BRAINROT_TIMEOUT_SECS must be greater than zero");
        }
        if self.model.trim().is_empty() {
            anyhow::bail!("BRAINROT_MODEL must not be empty");
        }
        Ok(())
    }
}
