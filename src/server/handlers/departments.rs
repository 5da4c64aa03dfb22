use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::database::entities::departments;
use crate::errors::ApiError;
use crate::server::app::AppState;
use crate::server::validation::{DepartmentPayload, Validated};
use crate::services::DepartmentService;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCreatedResponse {
    pub message: &'static str,
    pub department_id: i32,
}

pub async fn list_departments(
    State(state): State<AppState>,
) -> Result<Json<Vec<departments::Model>>, ApiError> {
    let service = DepartmentService::new(state.db.clone());
    let rows = service
        .list()
        .await
        .map_err(ApiError::store("Error fetching departments"))?;

    Ok(Json(rows))
}

pub async fn create_department(
    State(state): State<AppState>,
    Validated(input): Validated<DepartmentPayload>,
) -> Result<Json<DepartmentCreatedResponse>, ApiError> {
    let service = DepartmentService::new(state.db.clone());
    let department_id = service
        .create(input)
        .await
        .map_err(ApiError::store("Error adding department"))?;

    info!("Department {} created", department_id);
    Ok(Json(DepartmentCreatedResponse {
        message: "Department added successfully",
        department_id,
    }))
}

/// Ids that are not integers cannot match a row, so they are treated like any unknown id.
fn department_id(raw: &str) -> Option<i32> {
    let id = raw.trim().parse().ok();
    if id.is_none() {
        debug!("Department id {:?} matches no row", raw);
    }
    id
}

pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Validated(input): Validated<DepartmentPayload>,
) -> Result<Json<MessageResponse>, ApiError> {
    let service = DepartmentService::new(state.db.clone());
    let touched = match department_id(&id) {
        Some(department_id) => service
            .update(department_id, input)
            .await
            .map_err(ApiError::store("Error updating department"))?,
        None => 0,
    };

    info!("Department {} updated ({} row(s))", id, touched);
    Ok(Json(MessageResponse {
        message: "Department updated successfully",
    }))
}

pub async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let service = DepartmentService::new(state.db.clone());
    let removed = match department_id(&id) {
        Some(department_id) => service
            .delete(department_id)
            .await
            .map_err(ApiError::store("Error deleting department"))?,
        None => 0,
    };

    info!("Department {} deleted ({} row(s))", id, removed);
    Ok(Json(MessageResponse {
        message: "Department deleted successfully",
    }))
}
