use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Clock-in events. Populated by an external system; this service only reads them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee_time_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub employee_number: String,
    pub employee_time_in: ChronoDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
