use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use brainrot::client::{FilterClient, DEFAULT_SERVICE_URL};
use brainrot::config::Config;
use brainrot::filter::models::FilterRequest;
use brainrot::filter::service::FilterService;
use brainrot::output::terminal;

/// Brain rot filter: scores text for quality using a language model.
///
/// Runs the HTTP filter service, or checks text from the command line.
#[derive(Parser)]
#[command(name = "brainrot", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP filter service
    Serve {
        /// Port to listen on (default: BRAINROT_PORT or 8000)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (default: BRAINROT_BIND or 0.0.0.0)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Score text locally with the configured backend, no server needed
    Score {
        /// The text to evaluate
        text: String,

        /// Extra guidance for the model
        #[arg(long)]
        context: Option<String>,
    },

    /// Score text through a running filter service
    Check {
        /// The text to evaluate
        text: String,

        /// Extra guidance for the model
        #[arg(long)]
        context: Option<String>,

        /// Base URL of the filter service
        #[arg(long, default_value = DEFAULT_SERVICE_URL)]
        url: String,
    },

    /// Show a running filter service's status
    Status {
        /// Base URL of the filter service
        #[arg(long, default_value = DEFAULT_SERVICE_URL)]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("brainrot=info,tower_http=info")
            }),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let port = port.unwrap_or(config.port);
            let bind = bind.unwrap_or_else(|| config.bind.clone());
            info!(
                backend = ?config.backend,
                threshold = config.threshold,
                timeout = ?config.backend_timeout,
                "Starting filter service"
            );
            let service = build_service(&config)?;
            brainrot::web::run_server(service, port, &bind).await?;
        }

        Commands::Score { text, context } => {
            let config = Config::load()?;
            let service = build_service(&config)?;
            let request = validate(text, context)?;
            let response = service.filter(&request).await?;
            terminal::display_verdict(&request.text, &response);
        }

        Commands::Check { text, context, url } => {
            let request = validate(text, context)?;
            let client = FilterClient::new(&url)?;
            let response = client
                .filter(&request.text, request.context.as_deref())
                .await?;
            terminal::display_verdict(&request.text, &response);
        }

        Commands::Status { url } => {
            let client = FilterClient::new(&url)?;
            let status = client.status().await?;
            terminal::display_status(client.base_url(), &status.status, &status.model);
        }
    }

    Ok(())
}

/// Create the configured backend and wrap it in a filter service.
fn build_service(config: &Config) -> Result<FilterService> {
    let backend = brainrot::backend::create_backend(config)?;
    Ok(FilterService::from_config(config, backend))
}

/// Apply the same validation the HTTP boundary does to CLI input.
fn validate(text: String, context: Option<String>) -> Result<FilterRequest> {
    let body = serde_json::json!({ "text": text, "context": context });
    FilterRequest::from_json(&body).map_err(|errors| {
        let detail: Vec<String> = errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        anyhow::anyhow!("Invalid input: {}", detail.join(", "))
    })
}
