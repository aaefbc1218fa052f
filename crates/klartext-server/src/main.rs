use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use klartext_core::Config;
use klartext_server::logging::init_logging;
use klartext_server::{run_server, AppState};

#[derive(Parser, Debug, Clone)]
#[command(name = "klartext-server")]
#[command(about = "German sentence splitting and plain-language rewriting of medical text")]
#[command(version)]
struct Cli {
    /// Enable debug mode
    #[arg(long, env = "DEBUG", default_value = "false")]
    debug: bool,

    /// Bind address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(long, env = "PORT", default_value = "8000")]
    port: u16,

    /// TOML configuration file (defaults to ./klartext.toml when present)
    #[arg(long, env = "KLARTEXT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (overrides debug flag)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Before parsing, so `.env` values back the CLI arguments too.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.debug, cli.log_level.as_deref());

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let state = AppState::from_config(&config).context("failed to initialise providers")?;

    run_server(state, &cli.host, cli.port)
        .await
        .context("server stopped with an error")
}
