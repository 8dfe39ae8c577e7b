use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use contractscan::{build_router, Container, ContainerConfig, ProviderKind};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Parser)]
#[command(name = "contractscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long)]
    verbose: bool,

    /// HTTP listen port (defaults to the PORT env var, then 3000)
    #[arg(short, long)]
    port: Option<u16>,

    /// Completion provider: anthropic or openai
    #[arg(long, default_value = "anthropic")]
    provider: String,

    /// Use the deterministic mock provider (no API key required)
    #[arg(long)]
    mock_provider: bool,

    /// Timeout for provider calls in seconds (env: REQUEST_TIMEOUT_SECS)
    #[arg(long)]
    request_timeout_secs: Option<u64>,

    /// Drop sessions older than this many seconds (env: SESSION_TTL_SECS)
    #[arg(long)]
    session_ttl_secs: Option<u64>,

    /// Keep at most this many sessions, evicting the oldest (env: SESSION_CAPACITY)
    #[arg(long)]
    session_capacity: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let port = cli.port.or_else(|| env_parse("PORT")).unwrap_or(DEFAULT_PORT);
    let request_timeout_secs = cli
        .request_timeout_secs
        .or_else(|| env_parse("REQUEST_TIMEOUT_SECS"))
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    let session_ttl_secs = cli.session_ttl_secs.or_else(|| env_parse("SESSION_TTL_SECS"));
    let session_capacity = cli.session_capacity.or_else(|| env_parse("SESSION_CAPACITY"));

    let config = ContainerConfig {
        provider: ProviderKind::parse(&cli.provider)?,
        mock_provider: cli.mock_provider,
        request_timeout: Duration::from_secs(request_timeout_secs),
        session_ttl: session_ttl_secs.map(Duration::from_secs),
        session_capacity,
    };

    let container = Arc::new(Container::new(config)?);
    let app = build_router(container);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("contractscan listening on {addr}");
    // Session state is in-memory only; every restart starts empty.
    info!("Sessions are process-local and are lost on restart");

    axum::serve(listener, app).await?;

    Ok(())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn mock_provider_flag_parses() {
        let cli = Cli::try_parse_from(["contractscan", "--mock-provider"]).unwrap();
        assert!(cli.mock_provider);
    }

    #[test]
    fn port_flag_parses() {
        let cli = Cli::try_parse_from(["contractscan", "--port", "8080"]).unwrap();
        assert_eq!(cli.port, Some(8080));
    }

    #[test]
    fn provider_defaults_to_anthropic() {
        let cli = Cli::try_parse_from(["contractscan"]).unwrap();
        assert_eq!(cli.provider, "anthropic");
    }
}
