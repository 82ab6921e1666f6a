//! Shared test utilities for `Bursar`.
//!
//! This module provides common helper functions for setting up test databases,
//! creating test entities with sensible defaults, and building in-memory payer
//! and reference fixtures for the pure pricing and draft tests.

use crate::{
    config,
    core::{
        payer::{self, PAYMENT_STATUS_PENDING, Payer},
        pricing::ClassTier,
        reference,
    },
    entities::{applicant, category, school_class, student},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test fee category.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<category::Model> {
    reference::create_category(db, name.to_string()).await
}

/// Creates a test class level with the given pricing tier.
pub async fn create_test_class(
    db: &DatabaseConnection,
    name: &str,
    tier: ClassTier,
) -> Result<school_class::Model> {
    reference::create_class(db, name.to_string(), tier).await
}

/// Creates a test student in the given category and class.
pub async fn create_test_student(
    db: &DatabaseConnection,
    name: &str,
    category_id: i64,
    class_id: i64,
) -> Result<student::Model> {
    payer::create_student(db, name.to_string(), category_id, class_id).await
}

/// Creates a test applicant applying for the given class.
pub async fn create_test_applicant(
    db: &DatabaseConnection,
    name: &str,
    category_id: i64,
    class_applying_for: i64,
) -> Result<applicant::Model> {
    payer::create_applicant(db, name.to_string(), category_id, class_applying_for).await
}

/// Sets up a database with one category ("SVC") and one class
/// ("Basic 5", tier `basic_5_6`).
/// Returns (db, category, class) for common test scenarios.
pub async fn setup_with_reference()
-> Result<(DatabaseConnection, category::Model, school_class::Model)> {
    let db = setup_test_db().await?;
    let category = create_test_category(&db, "SVC").await?;
    let class = create_test_class(&db, "Basic 5", ClassTier::Basic5To6).await?;
    Ok((db, category, class))
}

/// Sets up a complete test environment with a student payer.
pub async fn setup_with_student() -> Result<(DatabaseConnection, Payer)> {
    let (db, category, class) = setup_with_reference().await?;
    let student = create_test_student(&db, "Test Student", category.id, class.id).await?;
    Ok((db, Payer::Student(student)))
}

/// Sets up a complete test environment with an applicant payer.
pub async fn setup_with_applicant() -> Result<(DatabaseConnection, Payer)> {
    let (db, category, class) = setup_with_reference().await?;
    let applicant = create_test_applicant(&db, "Test Applicant", category.id, class.id).await?;
    Ok((db, Payer::Applicant(applicant)))
}

/// In-memory reference fixture for the pure calculation tests:
/// categories SVC (id 1) and CIV (id 2); classes "Basic 5" / `basic_5_6`
/// (id 1) and "KG 1" / `kg` (id 2).
#[must_use]
pub fn sample_reference() -> (Vec<category::Model>, Vec<school_class::Model>) {
    (
        vec![
            category::Model {
                id: 1,
                name: "SVC".to_string(),
            },
            category::Model {
                id: 2,
                name: "CIV".to_string(),
            },
        ],
        vec![
            school_class::Model {
                id: 1,
                name: "Basic 5".to_string(),
                tier: "basic_5_6".to_string(),
            },
            school_class::Model {
                id: 2,
                name: "KG 1".to_string(),
                tier: "kg".to_string(),
            },
        ],
    )
}

/// In-memory student payer referencing the given category and class ids.
#[must_use]
pub fn sample_student(category_id: i64, class_id: i64) -> Payer {
    Payer::Student(student::Model {
        id: 1,
        name: "Test Student".to_string(),
        category_id,
        class_id,
        is_deleted: false,
    })
}

/// In-memory applicant payer referencing the given category and class ids.
#[must_use]
pub fn sample_applicant(category_id: i64, class_applying_for: i64) -> Payer {
    Payer::Applicant(applicant::Model {
        id: 1,
        name: "Test Applicant".to_string(),
        category_id,
        class_applying_for,
        payment_status: PAYMENT_STATUS_PENDING.to_string(),
        is_deleted: false,
    })
}
