use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::errors::ApiError;
use crate::server::app::AppState;
use crate::services::{AttendanceService, DailyAttendance};

pub async fn employee_records(
    State(state): State<AppState>,
    Path(employee_number): Path<String>,
) -> Result<Json<Vec<DailyAttendance>>, ApiError> {
    let service = AttendanceService::new(state.db.clone());
    let days = service
        .daily_attendance(&employee_number)
        .await
        .map_err(ApiError::store("Database query error"))?;

    Ok(Json(days))
}
