//! Class level entity - Static reference data for book pricing.
//!
//! Each class (e.g. "KG 1 A", "Basic 5") carries an explicit pricing `tier`
//! assigned when the class is created, so pricing never has to guess the
//! tier from the display name at lookup time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Class level database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "school_classes")]
pub struct Model {
    /// Unique identifier for the class
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the class (e.g. "KG 1 A", "Basic 5")
    pub name: String,
    /// Canonical pricing tier name (e.g. "kg", "basic_5_6")
    pub tier: String,
}

/// Defines relationships between `SchoolClass` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One class holds many students
    #[sea_orm(has_many = "super::student::Entity")]
    Students,
    /// One class is applied for by many applicants
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
