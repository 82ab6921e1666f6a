//! Receipt entity - An immutable record of one fee payment.
//!
//! A receipt is owned by exactly one payer: either `student_id` or
//! `applicant_id` is set, never both. The header `amount` always equals the
//! sum of the line item amounts. Receipts are only ever created; there is no
//! update path.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Receipt database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receipts")]
pub struct Model {
    /// Unique identifier for the receipt
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning student, None for applicant receipts
    pub student_id: Option<i64>,
    /// Owning applicant, None for student receipts
    pub applicant_id: Option<i64>,
    /// When the receipt was issued
    pub date_issued: DateTimeUtc,
    /// Total amount, equal to the sum of the line item amounts
    pub amount: f64,
    /// How the payment was made (e.g. "cash", "cheque")
    pub payment_type: String,
    /// Optional venue the payment was taken at
    pub venue: Option<String>,
}

/// Defines relationships between Receipt and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each student receipt belongs to one student
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
    /// Each applicant receipt belongs to one applicant
    #[sea_orm(
        belongs_to = "super::applicant::Entity",
        from = "Column::ApplicantId",
        to = "super::applicant::Column::Id"
    )]
    Applicant,
    /// One receipt carries many line items
    #[sea_orm(has_many = "super::receipt_item::Entity")]
    ReceiptItems,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::applicant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applicant.def()
    }
}

impl Related<super::receipt_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReceiptItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
