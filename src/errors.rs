//! HTTP boundary errors.
//!
//! Client errors (400) are raised before any side effect. Server errors (500) log their
//! cause and return only a generic message, so no driver or parser detail leaves the
//! process.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::spreadsheet::SpreadsheetError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No file uploaded")]
    MissingFile,

    /// Carries the message returned to the client.
    #[error("{0}")]
    MissingRequiredField(&'static str),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: DbErr,
    },

    #[error("{context}: {source}")]
    Parse {
        context: &'static str,
        #[source]
        source: SpreadsheetError,
    },

    #[error("Error storing uploaded file: {0}")]
    UploadStorage(#[from] std::io::Error),
}

impl ApiError {
    pub fn store(context: &'static str) -> impl FnOnce(DbErr) -> Self {
        move |source| ApiError::Store { context, source }
    }

    pub fn parse(context: &'static str) -> impl FnOnce(SpreadsheetError) -> Self {
        move |source| ApiError::Parse { context, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFile
            | ApiError::MissingRequiredField(_)
            | ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Store { .. } | ApiError::Parse { .. } | ApiError::UploadStorage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text safe to show to the client.
    pub fn public_message(&self) -> &str {
        match self {
            ApiError::MissingFile => "No file uploaded",
            ApiError::MissingRequiredField(message) => *message,
            ApiError::InvalidRequest(_) => "Invalid request body",
            ApiError::Store { context, .. } | ApiError::Parse { context, .. } => *context,
            ApiError::UploadStorage(_) => "Error storing uploaded file",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("Rejected request: {}", self);
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
