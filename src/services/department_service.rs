use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use sea_orm::sea_query::Expr;

use crate::database::entities::departments;

/// Both department fields, already checked for presence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepartmentInput {
    pub department_name: String,
    pub department_code: String,
}

#[derive(Clone)]
pub struct DepartmentService {
    db: DatabaseConnection,
}

impl DepartmentService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a department and returns its generated id.
    pub async fn create(&self, input: DepartmentInput) -> Result<i32, DbErr> {
        let department = departments::ActiveModel {
            id: NotSet,
            department_name: Set(input.department_name),
            department_code: Set(input.department_code),
        };

        let result = departments::Entity::insert(department)
            .exec(&self.db)
            .await?;

        Ok(result.last_insert_id)
    }

    /// Replaces both fields of the department. Returns the number of rows touched;
    /// an unknown id touches none and is not an error.
    pub async fn update(&self, id: i32, input: DepartmentInput) -> Result<u64, DbErr> {
        let result = departments::Entity::update_many()
            .col_expr(
                departments::Column::DepartmentName,
                Expr::value(input.department_name),
            )
            .col_expr(
                departments::Column::DepartmentCode,
                Expr::value(input.department_code),
            )
            .filter(departments::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = departments::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    pub async fn list(&self) -> Result<Vec<departments::Model>, DbErr> {
        departments::Entity::find()
            .order_by_asc(departments::Column::Id)
            .all(&self.db)
            .await
    }
}
