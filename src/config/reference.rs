//! Reference data configuration loading from config.toml
//!
//! This module provides functionality to load the fee categories and class
//! levels from a TOML configuration file. The entries defined in config.toml
//! are used to seed the database on first run or when entries are missing.

use crate::core::pricing::ClassTier;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct ReferenceConfig {
    /// Fee categories to seed
    pub categories: Vec<CategoryConfig>,
    /// Class levels to seed
    pub classes: Vec<ClassConfig>,
}

/// Configuration for a single fee category
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryConfig {
    /// Short category code (e.g. "SVC")
    pub name: String,
}

/// Configuration for a single class level
#[derive(Debug, Deserialize, Clone)]
pub struct ClassConfig {
    /// Display name of the class (e.g. "Basic 5")
    pub name: String,
    /// Pricing tier the class bills at (e.g. `basic_5_6`)
    pub tier: ClassTier,
}

/// Loads reference configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing or a tier name is unknown
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ReferenceConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads reference configuration from the default location (./config.toml)
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_default_config() -> Result<ReferenceConfig> {
    load_config("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_reference_config() {
        let toml_str = r#"
            [[categories]]
            name = "SVC"

            [[categories]]
            name = "CIV"

            [[classes]]
            name = "KG 1 A"
            tier = "kg"

            [[classes]]
            name = "Basic 5"
            tier = "basic_5_6"
        "#;

        let config: ReferenceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.categories.len(), 2);
        assert_eq!(config.categories[0].name, "SVC");

        assert_eq!(config.classes.len(), 2);
        assert_eq!(config.classes[0].tier, ClassTier::Kg);
        assert_eq!(config.classes[1].name, "Basic 5");
        assert_eq!(config.classes[1].tier, ClassTier::Basic5To6);
    }

    #[test]
    fn test_unknown_tier_is_rejected() {
        let toml_str = r#"
            [[categories]]
            name = "SVC"

            [[classes]]
            name = "Basic 5"
            tier = "primary_5"
        "#;

        assert!(toml::from_str::<ReferenceConfig>(toml_str).is_err());
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let result = load_config("definitely/not/here.toml");
        assert!(matches!(result.unwrap_err(), Error::Config { .. }));
    }
}
