//! Development bootstrap for the four tables this service touches.
//!
//! Production schemas are owned by the database administrator. This only issues
//! `CREATE TABLE IF NOT EXISTS` from the entity definitions so a fresh SQLite file or a
//! scratch MySQL database can be used directly.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Schema};
use tracing::info;

use super::entities::{departments, employee_info, employee_time_logs, items};

pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, items::Entity).await?;
    create_table(db, employee_info::Entity).await?;
    create_table(db, employee_time_logs::Entity).await?;
    create_table(db, departments::Entity).await?;

    info!("Database schema bootstrap completed");
    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement)).await?;
    Ok(())
}
