/// Database configuration and connection management
pub mod database;

/// Reference data (categories and class levels) loading from config.toml
pub mod reference;
