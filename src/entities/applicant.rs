//! Applicant entity - A prospective pupil who has not yet enrolled.
//!
//! Applicants reference a fee category and the class they are applying for.
//! They are the only payers who owe the one-time registration component,
//! and `payment_status` flips to "paid" once a registration receipt is
//! issued for them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Applicant database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "applicants")]
pub struct Model {
    /// Unique identifier for the applicant
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name of the applicant
    pub name: String,
    /// Fee category the applicant belongs to
    pub category_id: i64,
    /// Class the applicant is applying for
    pub class_applying_for: i64,
    /// Registration payment status: `"pending"` or `"paid"`
    pub payment_status: String,
    /// Soft delete flag - if true, applicant is hidden but data is preserved
    pub is_deleted: bool,
}

/// Defines relationships between Applicant and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each applicant belongs to one fee category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// Each applicant applies for one class
    #[sea_orm(
        belongs_to = "super::school_class::Entity",
        from = "Column::ClassApplyingFor",
        to = "super::school_class::Column::Id"
    )]
    SchoolClass,
    /// One applicant receives many receipts
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
