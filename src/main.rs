//! MCP Server Entry Point
//!
//! Parses the command line, initializes logging, loads configuration and
//! starts the server on the selected transport:
//!
//! - `--stdio`: JSON-RPC over stdin/stdout
//! - `--rest`: REST facade with the MCP adapter at `/mcp`
//! - neither: SSE transport (`GET /sse`, `POST /messages/`)

use anyhow::Result;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use quickstart_mcp_server::core::transport::TransportResult;
use quickstart_mcp_server::core::{Config, LoggingConfig, McpServer, TransportConfig, TransportService};

#[derive(Debug, Parser)]
#[command(name = "quickstart-mcp-server", version, about)]
struct Cli {
    /// Serve over stdin/stdout instead of SSE
    #[arg(long, conflicts_with = "rest")]
    stdio: bool,

    /// Serve the REST facade with the MCP adapter mounted
    #[arg(long)]
    rest: bool,

    /// Address to bind (SSE defaults to 127.0.0.1, REST to 0.0.0.0)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (default 8000)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from environment; flags take precedence
    let mut config = Config::from_env();
    config.transport = select_transport(&cli, config.transport)?;

    // Initialize logging
    init_logging(&config.logging);

    info!("Starting {} v{}", config.server.name, config.server.version);

    // Create the MCP server
    let server = McpServer::new(config.clone())?;

    info!(
        "Server initialized with {} capabilities",
        server.registry().capabilities().len()
    );

    // Create and run the transport service
    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Apply the command-line transport flags on top of the configured transport.
fn select_transport(
    cli: &Cli,
    configured: TransportConfig,
) -> quickstart_mcp_server::Result<TransportConfig> {
    let transport = if cli.stdio {
        stdio_transport()?
    } else if cli.rest {
        rest_transport(configured)?
    } else {
        configured
    };

    Ok(transport.with_bind(cli.host.clone(), cli.port))
}

#[cfg(feature = "stdio")]
fn stdio_transport() -> TransportResult<TransportConfig> {
    Ok(TransportConfig::stdio())
}

#[cfg(not(feature = "stdio"))]
fn stdio_transport() -> TransportResult<TransportConfig> {
    Err(quickstart_mcp_server::core::transport::TransportError::unsupported("stdio"))
}

#[cfg(feature = "http")]
fn rest_transport(configured: TransportConfig) -> TransportResult<TransportConfig> {
    Ok(match configured {
        rest @ TransportConfig::Rest(_) => rest,
        _ => TransportConfig::Rest(Default::default()),
    })
}

#[cfg(not(feature = "http"))]
fn rest_transport(_configured: TransportConfig) -> TransportResult<TransportConfig> {
    Err(quickstart_mcp_server::core::transport::TransportError::unsupported("rest"))
}

/// Initialize the logging subsystem.
///
/// Logs always go to stderr; stdout is reserved for the stdio transport.
fn init_logging(config: &LoggingConfig) {
    let level = match config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if config.with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
