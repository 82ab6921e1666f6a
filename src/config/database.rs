//! Database configuration module for the fee service.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary
//! tables based on the entity definitions. The module uses `SeaORM`'s
//! `Schema::create_table_from_entity` method to automatically generate SQL statements from
//! the entity models, ensuring that the database schema matches the Rust struct definitions
//! without requiring manual SQL.

use crate::entities::{Applicant, Category, Receipt, ReceiptItem, SchoolClass, Student};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/bursar.sqlite";

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL`
/// environment variable, falling back to a default local `SQLite` file.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from
/// entity definitions.
///
/// Reference tables (categories, classes) come first so payer and receipt tables
/// can reference them. Safe to call on an empty database only; existing tables
/// are not migrated.
///
/// # Errors
/// Returns an error if any table creation statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let category_table = schema.create_table_from_entity(Category);
    let class_table = schema.create_table_from_entity(SchoolClass);
    let student_table = schema.create_table_from_entity(Student);
    let applicant_table = schema.create_table_from_entity(Applicant);
    let receipt_table = schema.create_table_from_entity(Receipt);
    let receipt_item_table = schema.create_table_from_entity(ReceiptItem);

    db.execute(builder.build(&category_table)).await?;
    db.execute(builder.build(&class_table)).await?;
    db.execute(builder.build(&student_table)).await?;
    db.execute(builder.build(&applicant_table)).await?;
    db.execute(builder.build(&receipt_table)).await?;
    db.execute(builder.build(&receipt_item_table)).await?;

    Ok(())
}
