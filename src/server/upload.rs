//! Temporary storage for uploaded workbooks.

use std::io::Write;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use axum::extract::Multipart;
use tracing::{debug, info, warn};

use crate::errors::ApiError;
use crate::spreadsheet::{self, RowRecord, SpreadsheetError};

/// Multipart field that carries the workbook.
pub const FILE_FIELD: &str = "file";

/// An uploaded file stored on disk for the duration of one request.
///
/// The file is removed when the value is dropped, whichever way the handler exits.
/// A failed removal is logged and otherwise ignored.
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
    file_name: Option<String>,
}

impl TempUpload {
    /// Reads the `file` field out of the multipart body and writes it under `upload_dir`.
    /// Other fields are skipped.
    pub async fn receive(mut multipart: Multipart, upload_dir: &Path) -> Result<Self, ApiError> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::InvalidRequest(e.body_text()))?
        {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }
            // Text parts named `file` do not count as an upload
            if field.file_name().is_none() {
                continue;
            }

            let file_name = field.file_name().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

            return Self::store(bytes, upload_dir.to_path_buf(), file_name).await;
        }

        Err(ApiError::MissingFile)
    }

    async fn store(
        bytes: Bytes,
        upload_dir: PathBuf,
        file_name: Option<String>,
    ) -> Result<Self, ApiError> {
        let size = bytes.len();
        let path = tokio::task::spawn_blocking(move || -> std::io::Result<PathBuf> {
            std::fs::create_dir_all(&upload_dir)?;
            let mut file = tempfile::Builder::new()
                .prefix("upload-")
                .tempfile_in(&upload_dir)?;
            file.write_all(&bytes)?;
            file.flush()?;
            // Deleted by `TempUpload::drop`
            let (_, path) = file.keep().map_err(|e| e.error)?;
            Ok(path)
        })
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))??;

        info!(
            "Stored upload {:?} ({} bytes) at {}",
            file_name.as_deref().unwrap_or("<unnamed>"),
            size,
            path.display()
        );

        Ok(Self { path, file_name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Decodes the first sheet of the stored workbook off the async runtime.
    pub async fn read_rows(&self) -> Result<Vec<RowRecord>, SpreadsheetError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || spreadsheet::read_first_sheet(&path)).await?
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Uploaded file deleted: {}", self.path.display()),
            Err(e) => warn!("Error deleting uploaded file {}: {}", self.path.display(), e),
        }
    }
}
