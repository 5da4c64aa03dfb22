#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use axum::body::Bytes;
use axum_test::TestServer;
use rust_xlsxwriter::Workbook;
use sea_orm::DatabaseConnection;
use staffbook::config::ServerConfig;
use staffbook::database::{ensure_schema, establish_connection, sqlite_file_url};
use staffbook::server::app::create_app;
use tempfile::TempDir;

pub const BOUNDARY: &str = "staffbook-test-boundary";

pub struct TestApp {
    pub server: TestServer,
    pub db: DatabaseConnection,
    pub upload_dir: PathBuf,
    _dir: TempDir,
}

/// Router backed by a fresh SQLite file with the four tables created.
pub async fn setup_test_app() -> Result<TestApp> {
    let dir = tempfile::tempdir()?;
    let db = establish_connection(&sqlite_file_url(&dir.path().join("staffbook.db"))).await?;
    ensure_schema(&db).await?;

    let upload_dir = dir.path().join("uploads");
    let config = ServerConfig {
        database_url: String::new(),
        upload_dir: upload_dir.clone(),
        ..ServerConfig::default()
    };

    let app = create_app(db.clone(), &config).await?;
    let server = TestServer::new(app)?;

    Ok(TestApp {
        server,
        db,
        upload_dir,
        _dir: dir,
    })
}

impl TestApp {
    /// Files left behind in the upload directory.
    pub fn leftover_uploads(&self) -> usize {
        std::fs::read_dir(&self.upload_dir)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

/// Cell content for a generated worksheet.
pub enum Cell {
    Text(&'static str),
    Number(f64),
    Blank,
}

pub fn xlsx_bytes(headers: &[&str], rows: &[Vec<Cell>]) -> Vec<u8> {
    xlsx_sheets_bytes(&[("Sheet1", headers, rows)])
}

/// Workbook with one worksheet per entry, in the given order.
pub fn xlsx_sheets_bytes(sheets: &[(&str, &[&str], &[Vec<Cell>])]) -> Vec<u8> {
    let mut workbook = Workbook::new();

    for (name, headers, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).unwrap();

        for (col, header) in headers.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header).unwrap();
        }
        for (row_idx, row) in rows.iter().enumerate() {
            let row_num = row_idx as u32 + 1;
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Text(value) => {
                        worksheet.write_string(row_num, col as u16, *value).unwrap();
                    }
                    Cell::Number(value) => {
                        worksheet.write_number(row_num, col as u16, *value).unwrap();
                    }
                    Cell::Blank => {}
                }
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// Builds a `multipart/form-data` body with a single file part.
pub fn multipart_file(field: &str, file_name: &str, content: &[u8]) -> Bytes {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    Bytes::from(body)
}

/// Builds a `multipart/form-data` body with a single text part.
pub fn multipart_text(field: &str, value: &str) -> Bytes {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{f}\"\r\n\r\n{v}\r\n--{b}--\r\n",
        b = BOUNDARY,
        f = field,
        v = value
    );
    Bytes::from(body)
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}
