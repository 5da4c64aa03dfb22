use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory item rows, written only by spreadsheet uploads.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item_table")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub item_name: Option<String>,
    pub employee_id: Option<String>,
    pub item_code: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
