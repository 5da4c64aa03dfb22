use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use staffbook::config::{ConfigOverrides, ServerConfig};
use staffbook::server;
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct ServerArgs {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    /// YAML file with server settings
    #[clap(short, long)]
    config: Option<PathBuf>,
    #[clap(short, long)]
    port: Option<u16>,
    /// Database connection URL, e.g. mysql://root@localhost/crud_db
    #[clap(short, long)]
    database: Option<String>,
    /// Directory for temporary upload files
    #[clap(long)]
    upload_dir: Option<PathBuf>,
    #[clap(long)]
    cors_origin: Option<String>,
    #[clap(long)]
    max_upload_bytes: Option<usize>,
    /// Create missing tables at startup
    #[clap(long)]
    bootstrap_schema: bool,
}

impl ServerArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            port: self.port,
            database_url: self.database.clone(),
            upload_dir: self.upload_dir.clone(),
            cors_origin: self.cors_origin.clone(),
            max_upload_bytes: self.max_upload_bytes,
            bootstrap_schema: self.bootstrap_schema,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();
    setup_logging(&args.log_level);

    let config = ServerConfig::load(args.config.as_deref(), args.overrides())?;

    info!("Starting server on port {}", config.port);
    server::start_server(config).await?;

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_string()))
        .init();
}
