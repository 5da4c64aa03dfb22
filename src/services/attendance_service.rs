use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect,
};
use serde::{Serialize, Serializer};

use crate::database::entities::employee_time_logs;

/// Attendance summary for one calendar day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DailyAttendance {
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_clock")]
    pub earliest_time: NaiveTime,
    #[serde(serialize_with = "serialize_clock")]
    pub last_time: NaiveTime,
    /// Span between the first and the last clock-in of the day.
    #[serde(serialize_with = "serialize_span")]
    pub time_difference: Duration,
}

#[derive(Debug, FromQueryResult)]
struct DailyBounds {
    date: NaiveDate,
    first_in: NaiveDateTime,
    last_in: NaiveDateTime,
}

impl DailyBounds {
    fn into_attendance(self) -> DailyAttendance {
        DailyAttendance {
            date: self.date,
            earliest_time: self.first_in.time(),
            last_time: self.last_in.time(),
            time_difference: self.last_in - self.first_in,
        }
    }
}

#[derive(Clone)]
pub struct AttendanceService {
    db: DatabaseConnection,
}

impl AttendanceService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// One entry per day with clock-ins for the employee, oldest day first.
    pub async fn daily_attendance(
        &self,
        employee_number: &str,
    ) -> Result<Vec<DailyAttendance>, DbErr> {
        let day: SimpleExpr = Func::cust(Alias::new("DATE"))
            .arg(Expr::col(employee_time_logs::Column::EmployeeTimeIn))
            .into();

        let rows = employee_time_logs::Entity::find()
            .select_only()
            .column_as(day.clone(), "date")
            .column_as(employee_time_logs::Column::EmployeeTimeIn.min(), "first_in")
            .column_as(employee_time_logs::Column::EmployeeTimeIn.max(), "last_in")
            .filter(employee_time_logs::Column::EmployeeNumber.eq(employee_number))
            .group_by(day.clone())
            .order_by_asc(day)
            .into_model::<DailyBounds>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(DailyBounds::into_attendance).collect())
    }
}

fn serialize_clock<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&time.format("%H:%M:%S"))
}

fn serialize_span<S>(span: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_span(span))
}

/// `HH:MM:SS`; hours are not wrapped at 24.
pub fn format_span(span: &Duration) -> String {
    let total = span.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    format!(
        "{}{:02}:{:02}:{:02}",
        sign,
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
