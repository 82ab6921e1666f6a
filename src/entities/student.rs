//! Student entity - An enrolled pupil who owes the recurring fee components.
//!
//! Students reference a fee category and the class they currently attend.
//! They never owe the one-time registration component; that belongs to
//! applicants only.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Student database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    /// Unique identifier for the student
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name of the student
    pub name: String,
    /// Fee category the student belongs to
    pub category_id: i64,
    /// Class the student currently attends
    pub class_id: i64,
    /// Soft delete flag - if true, student is hidden but data is preserved
    pub is_deleted: bool,
}

/// Defines relationships between Student and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each student belongs to one fee category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// Each student attends one class
    #[sea_orm(
        belongs_to = "super::school_class::Entity",
        from = "Column::ClassId",
        to = "super::school_class::Column::Id"
    )]
    SchoolClass,
    /// One student receives many receipts
    #[sea_orm(has_many = "super::receipt::Entity")]
    Receipts,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::school_class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchoolClass.def()
    }
}

impl Related<super::receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
