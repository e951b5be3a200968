use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hypha::config::AppConfig;
use hypha::server::{create_router, AppState};
use hypha::shutdown::wait_for_shutdown;

#[derive(Parser)]
#[command(name = "hypha", about = "LLM agent that opens GitHub issues from plain-language requests")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Validate configuration and credentials, then exit
    Check,
    /// Resolve a single issue request and print the reply
    Ask {
        /// The request text
        request: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    let missing = config.missing_credentials();
    for name in &missing {
        tracing::warn!(variable = %name, "Credential is not set; dependent agent calls will fail");
    }

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Check => {
            if missing.is_empty() {
                println!("Configuration OK");
                Ok(())
            } else {
                anyhow::bail!("missing credentials: {}", missing.join(", "))
            }
        }
        Command::Ask { request } => {
            let state = AppState::new(config);
            let request = request.join(" ");
            println!("{}", state.issue_agent.handle(Some(request.as_str())).await);
            Ok(())
        }
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        model = %config.openai.model,
        "Starting Hypha server"
    );

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    let state = Arc::new(AppState::new(config));
    let app = create_router(state);

    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
