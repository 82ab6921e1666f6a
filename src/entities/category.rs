//! Fee category entity - Static reference data for levy pricing.
//!
//! Categories are short codes (e.g. "SVC", "MOD", "CIV") assigned to both
//! students and applicants; the code selects the levy pricing tier.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fee category database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Short category code (e.g. "SVC")
    pub name: String,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category covers many students
    #[sea_orm(has_many = "super::student::Entity")]
    Students,
    /// One category covers many applicants
    #[sea_orm(has_many = "super::applicant::Entity")]
    Applicants,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl Related<super::applicant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applicants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
