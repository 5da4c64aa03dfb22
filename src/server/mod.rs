pub mod app;
pub mod handlers;
pub mod upload;
pub mod validation;

use anyhow::Result;
use tracing::info;

use crate::config::ServerConfig;
use crate::database::{ensure_schema, establish_connection};

pub async fn start_server(config: ServerConfig) -> Result<()> {
    let db = establish_connection(&config.database_url).await?;
    info!("Connected to database");

    if config.bootstrap_schema {
        ensure_schema(&db).await?;
    }

    let app = app::create_app(db, &config).await?;

    log_routes();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!("Server running on http://0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes() {
    info!("API Endpoints:");
    info!("  GET    /health                              - Health check");
    info!("  POST   /upload-xls                          - Import items from a workbook");
    info!("  POST   /upload-employee-info                - Import employee info from a workbook");
    info!("  GET    /employee-records/:employee_number   - Daily attendance summary");
    info!("  GET    /departments                         - List departments");
    info!("  POST   /departments                         - Create a department");
    info!("  PUT    /departments/:id                     - Replace a department");
    info!("  DELETE /departments/:id                     - Delete a department");
}
