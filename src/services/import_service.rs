use sea_orm::sea_query::{Query, SimpleExpr};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityName, Iden, Value};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::database::entities::{employee_info, items};
use crate::spreadsheet::{CellValue, EmployeeInfoRow, ItemRow, RowRecord};

/// Outcome of one spreadsheet import. Rows are inserted independently, so some may
/// fail while the rest are stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub total_rows: usize,
    pub inserted_rows: usize,
    pub failed_rows: usize,
    pub failures: Vec<RowFailure>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    /// Sheet row number as shown in a spreadsheet tool (the header is row 1).
    pub row: usize,
    pub error: String,
}

impl ImportReport {
    pub fn is_complete(&self) -> bool {
        self.failed_rows == 0
    }

    fn record(&mut self, index: usize, result: Result<(), DbErr>) {
        self.total_rows += 1;
        match result {
            Ok(()) => self.inserted_rows += 1,
            Err(_) => {
                self.failed_rows += 1;
                self.failures.push(RowFailure {
                    row: index + 2,
                    error: "Row could not be inserted".to_string(),
                });
            }
        }
    }
}

#[derive(Clone)]
pub struct ImportService {
    db: DatabaseConnection,
}

impl ImportService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts every record into `item_table`, one statement per row, in sheet order.
    pub async fn import_items(&self, records: &[RowRecord]) -> ImportReport {
        let mut report = ImportReport::default();

        for (index, record) in records.iter().enumerate() {
            let row = ItemRow::from_record(record);
            let result = self.insert_item(&row).await;
            match &result {
                Ok(()) => debug!("Inserted item row {}", index + 2),
                Err(e) => error!("Error inserting item row {}: {}", index + 2, e),
            }
            report.record(index, result);
        }

        info!(
            "Item import finished: {} inserted, {} failed",
            report.inserted_rows, report.failed_rows
        );
        report
    }

    /// Inserts every record into `employee_info`, one statement per row, in sheet order.
    pub async fn import_employee_info(&self, records: &[RowRecord]) -> ImportReport {
        let mut report = ImportReport::default();

        for (index, record) in records.iter().enumerate() {
            let row = EmployeeInfoRow::from_record(record);
            let result = self.insert_employee_info(&row).await;
            match &result {
                Ok(()) => debug!("Inserted employee info row {}", index + 2),
                Err(e) => error!("Error inserting employee info row {}: {}", index + 2, e),
            }
            report.record(index, result);
        }

        info!(
            "Employee info import finished: {} inserted, {} failed",
            report.inserted_rows, report.failed_rows
        );
        report
    }

    pub async fn insert_item(&self, row: &ItemRow) -> Result<(), DbErr> {
        let item_code = match &row.item_code {
            Some(code) => Value::from(code.clone()),
            None => Value::String(None),
        };

        self.insert_row(
            items::Entity,
            [
                items::Column::ItemName,
                items::Column::EmployeeId,
                items::Column::ItemCode,
            ],
            [
                bind(row.item_name.as_ref()),
                bind(row.employee_id.as_ref()),
                item_code,
            ],
        )
        .await
    }

    pub async fn insert_employee_info(&self, row: &EmployeeInfoRow) -> Result<(), DbErr> {
        self.insert_row(
            employee_info::Entity,
            [
                employee_info::Column::EmployeeNumber,
                employee_info::Column::EmployeeName,
                employee_info::Column::EmployeeSalary,
                employee_info::Column::Position,
            ],
            [
                bind(row.employee_number.as_ref()),
                bind(row.employee_name.as_ref()),
                bind(row.employee_salary.as_ref()),
                bind(row.position.as_ref()),
            ],
        )
        .await
    }

    async fn insert_row<E, C, const N: usize>(
        &self,
        entity: E,
        columns: [C; N],
        values: [Value; N],
    ) -> Result<(), DbErr>
    where
        E: EntityName,
        C: Iden + 'static,
    {
        let mut insert = Query::insert();
        insert
            .into_table(entity.table_ref())
            .columns(columns)
            .values(values.into_iter().map(SimpleExpr::from))
            .map_err(|e| DbErr::Custom(e.to_string()))?;

        let backend = self.db.get_database_backend();
        self.db.execute(backend.build(&insert)).await?;
        Ok(())
    }
}

/// Cell values are bound as-is; the store applies its own column coercion.
fn bind(cell: Option<&CellValue>) -> Value {
    match cell {
        Some(CellValue::Text(s)) => Value::from(s.clone()),
        Some(CellValue::Int(i)) => Value::from(*i),
        Some(CellValue::Float(f)) => Value::from(*f),
        Some(CellValue::Bool(b)) => Value::from(*b),
        None => Value::String(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ensure_schema;
    use crate::database::establish_connection;
    use sea_orm::EntityTrait;

    async fn setup_service() -> ImportService {
        let db = establish_connection("sqlite::memory:")
            .await
            .expect("Failed to connect to test database");
        ensure_schema(&db).await.expect("Failed to create schema");
        ImportService::new(db)
    }

    fn record(pairs: &[(&str, CellValue)]) -> RowRecord {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_every_row_is_attempted() {
        let service = setup_service().await;
        let records = vec![
            record(&[
                ("item_name", CellValue::Text("Laptop".into())),
                ("employee_id", CellValue::Int(7)),
                ("item_code", CellValue::Text(" LP-1 ".into())),
            ]),
            record(&[("item_name", CellValue::Text("Mouse".into()))]),
            record(&[("item_code\r\n", CellValue::Text("MS-2\r\n".into()))]),
        ];

        let report = service.import_items(&records).await;

        assert_eq!(report.total_rows, 3);
        assert_eq!(report.inserted_rows, 3);
        assert!(report.is_complete());

        let rows = items::Entity::find().all(&service.db).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].item_code.as_deref(), Some("LP-1"));
        assert_eq!(rows[0].employee_id.as_deref(), Some("7"));
        assert_eq!(rows[1].item_code, None);
        assert_eq!(rows[2].item_code.as_deref(), Some("MS-2"));
    }

    #[tokio::test]
    async fn test_employee_info_rows_are_stored() {
        let service = setup_service().await;
        let records = vec![record(&[
            ("employee_number", CellValue::Text("E-01".into())),
            ("employee_name", CellValue::Text("Ada".into())),
            ("employee_salary", CellValue::Int(52000)),
            ("position", CellValue::Text("Engineer".into())),
        ])];

        let report = service.import_employee_info(&records).await;
        assert_eq!(report.inserted_rows, 1);

        let rows = employee_info::Entity::find().all(&service.db).await.unwrap();
        assert_eq!(rows[0].employee_number.as_deref(), Some("E-01"));
        assert_eq!(rows[0].employee_salary, Some(52000.0));
        assert_eq!(rows[0].position.as_deref(), Some("Engineer"));
    }

    #[tokio::test]
    async fn test_failed_rows_do_not_stop_the_import() {
        let db = establish_connection("sqlite::memory:").await.unwrap();
        db.execute_unprepared(
            "CREATE TABLE item_table (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                item_name TEXT NOT NULL,
                employee_id TEXT,
                item_code TEXT
            )",
        )
        .await
        .unwrap();
        let service = ImportService::new(db);

        let records = vec![
            record(&[("item_name", CellValue::Text("Laptop".into()))]),
            record(&[("item_code", CellValue::Text("NO-NAME".into()))]),
            record(&[("item_name", CellValue::Text("Dock".into()))]),
        ];

        let report = service.import_items(&records).await;

        assert_eq!(report.total_rows, 3);
        assert_eq!(report.inserted_rows, 2);
        assert_eq!(report.failed_rows, 1);
        assert_eq!(report.failures[0].row, 3);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_bind_keeps_cell_types() {
        assert_eq!(bind(None), Value::String(None));
        assert_eq!(bind(Some(&CellValue::Int(3))), Value::BigInt(Some(3)));
        assert_eq!(bind(Some(&CellValue::Bool(true))), Value::Bool(Some(true)));
    }
}
