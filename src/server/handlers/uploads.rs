use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::Json,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::ApiError;
use crate::server::app::AppState;
use crate::server::upload::TempUpload;
use crate::services::{ImportReport, ImportService};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    #[serde(flatten)]
    pub report: ImportReport,
}

impl UploadResponse {
    fn new(success: &str, partial: &str, report: ImportReport) -> Self {
        let message = if report.is_complete() {
            success.to_string()
        } else {
            format!("{} with {} failed row(s)", partial, report.failed_rows)
        };
        Self { message, report }
    }
}

/// A request without a multipart body carries no file.
async fn receive(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<TempUpload, ApiError> {
    let multipart = multipart.map_err(|_| ApiError::MissingFile)?;
    TempUpload::receive(multipart, &state.upload_dir).await
}

pub async fn upload_items(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let upload = receive(&state, multipart).await?;

    let rows = upload
        .read_rows()
        .await
        .map_err(ApiError::parse("Error processing XLS file"))?;
    info!(
        "Uploaded sheet {:?} has {} data row(s)",
        upload.file_name(),
        rows.len()
    );
    debug!("Uploaded sheet data: {:?}", rows);

    let report = ImportService::new(state.db.clone())
        .import_items(&rows)
        .await;

    Ok(Json(UploadResponse::new(
        "File uploaded and data inserted successfully",
        "File processed",
        report,
    )))
}

pub async fn upload_employee_info(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let upload = receive(&state, multipart).await?;

    let rows = upload
        .read_rows()
        .await
        .map_err(ApiError::parse("Error processing employee info XLS file"))?;
    info!(
        "Uploaded employee info sheet {:?} has {} data row(s)",
        upload.file_name(),
        rows.len()
    );
    debug!("Uploaded employee info data: {:?}", rows);

    let report = ImportService::new(state.db.clone())
        .import_employee_info(&rows)
        .await;

    Ok(Json(UploadResponse::new(
        "Employee info file uploaded and data inserted successfully",
        "Employee info file processed",
        report,
    )))
}
