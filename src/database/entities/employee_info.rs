use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee_info")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub employee_number: Option<String>,
    pub employee_name: Option<String>,
    pub employee_salary: Option<f64>,
    pub position: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
