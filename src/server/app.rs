use std::path::PathBuf;

use anyhow::{anyhow, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{attendance, departments, health, uploads};
use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub upload_dir: PathBuf,
}

pub async fn create_app(db: DatabaseConnection, config: &ServerConfig) -> Result<Router> {
    let state = AppState {
        db,
        upload_dir: config.upload_dir.clone(),
    };

    let cors = match config.cors_origin.as_deref() {
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<axum::http::HeaderValue>()
                    .map_err(|e| anyhow!("Invalid CORS origin: {}", e))?,
            )
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        // Health check endpoint
        .route("/health", get(health::health_check))
        .merge(upload_routes(config.max_upload_bytes))
        .route(
            "/employee-records/:employee_number",
            get(attendance::employee_records),
        )
        .route(
            "/departments",
            get(departments::list_departments).post(departments::create_department),
        )
        .route(
            "/departments/:id",
            put(departments::update_department).delete(departments::delete_department),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state);

    Ok(app)
}

fn upload_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/upload-xls", post(uploads::upload_items))
        .route("/upload-employee-info", post(uploads::upload_employee_info))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
