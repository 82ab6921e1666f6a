//! Receipt line item entity - One fee component on a receipt.
//!
//! `component` stores the canonical fee component name (e.g. "levy",
//! "text_books") as produced by the pricing module.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Receipt line item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receipt_items")]
pub struct Model {
    /// Unique identifier for the line item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Receipt this line item belongs to
    pub receipt_id: i64,
    /// Canonical fee component name
    pub component: String,
    /// Amount charged for this component
    pub amount: f64,
}

/// Defines relationships between `ReceiptItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line item belongs to one receipt
    #[sea_orm(
        belongs_to = "super::receipt::Entity",
        from = "Column::ReceiptId",
        to = "super::receipt::Column::Id"
    )]
    Receipt,
}

impl Related<super::receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipt.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
