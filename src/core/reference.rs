//! Reference data business logic - Fee categories and class levels.
//!
//! Categories and classes are static lookup data: they parameterize pricing
//! but are not edited as part of the receipt workflow. This module provides
//! lookups, validated creation, config-driven seeding, and the resolution of
//! a payer's pricing context from already-fetched collections.

use crate::{
    config::reference::ReferenceConfig,
    core::{
        payer::Payer,
        pricing::{ClassTier, PricingContext},
    },
    entities::{Category, SchoolClass, category, school_class},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::HashSet;
use tracing::info;

/// Retrieves all fee categories, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all class levels, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_classes(db: &DatabaseConnection) -> Result<Vec<school_class::Model>> {
    SchoolClass::find()
        .order_by_asc(school_class::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new fee category, performing input validation.
///
/// # Errors
/// Returns an error if the name is empty or the database insert fails.
pub async fn create_category(db: &DatabaseConnection, name: String) -> Result<category::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Category name cannot be empty".to_string(),
        });
    }

    let category = category::ActiveModel {
        name: Set(name.trim().to_string()),
        ..Default::default()
    };
    category.insert(db).await.map_err(Into::into)
}

/// Creates a new class level with an explicit pricing tier.
///
/// # Errors
/// Returns an error if the name is empty or the database insert fails.
pub async fn create_class(
    db: &DatabaseConnection,
    name: String,
    tier: ClassTier,
) -> Result<school_class::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Class name cannot be empty".to_string(),
        });
    }

    let class = school_class::ActiveModel {
        name: Set(name.trim().to_string()),
        tier: Set(tier.as_str().to_string()),
        ..Default::default()
    };
    class.insert(db).await.map_err(Into::into)
}

/// Seeds the categories and classes declared in the reference configuration.
///
/// Idempotent: entries whose name already exists are skipped, so running the
/// seed repeatedly (e.g. on every startup) adds nothing the second time.
///
/// # Errors
/// Returns an error if a lookup or insert fails.
pub async fn seed_reference_data(db: &DatabaseConnection, config: &ReferenceConfig) -> Result<()> {
    let existing_categories: HashSet<String> = get_all_categories(db)
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();
    let existing_classes: HashSet<String> = get_all_classes(db)
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();

    let mut seeded_categories = 0;
    for category_config in &config.categories {
        if !existing_categories.contains(category_config.name.trim()) {
            create_category(db, category_config.name.clone()).await?;
            seeded_categories += 1;
        }
    }

    let mut seeded_classes = 0;
    for class_config in &config.classes {
        if !existing_classes.contains(class_config.name.trim()) {
            create_class(db, class_config.name.clone(), class_config.tier).await?;
            seeded_classes += 1;
        }
    }

    info!(
        categories = seeded_categories,
        classes = seeded_classes,
        "Seeded reference data"
    );
    Ok(())
}

/// Resolves a payer's pricing context from reference collections.
///
/// Pure lookup over already-fetched data. A category that cannot be found
/// resolves to an empty code and a class that cannot be found resolves to
/// the general tier; neither is an error, matching the defensive pricing
/// fallbacks. A class row whose stored tier value is unrecognized falls
/// back to classifying its display name.
#[must_use]
pub fn pricing_context_for(
    payer: &Payer,
    categories: &[category::Model],
    classes: &[school_class::Model],
) -> PricingContext {
    let category_name = categories
        .iter()
        .find(|c| c.id == payer.category_id())
        .map(|c| c.name.as_str())
        .unwrap_or_default();

    let tier = classes
        .iter()
        .find(|c| c.id == payer.class_id())
        .map_or(ClassTier::General, |c| {
            c.tier
                .parse()
                .unwrap_or_else(|_| ClassTier::classify(&c.name))
        });

    PricingContext::new(category_name, tier)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::reference::{CategoryConfig, ClassConfig};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_category_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_category(&db, "  ".to_string()).await;
        assert!(matches!(result.unwrap_err(), Error::Config { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_class_stores_tier() -> Result<()> {
        let db = setup_test_db().await?;

        let class = create_class(&db, "Basic 3".to_string(), ClassTier::Basic3To4).await?;
        assert_eq!(class.tier, "basic_3_4");

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_reference_data_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let config = ReferenceConfig {
            categories: vec![
                CategoryConfig {
                    name: "SVC".to_string(),
                },
                CategoryConfig {
                    name: "CIV".to_string(),
                },
            ],
            classes: vec![ClassConfig {
                name: "KG 1".to_string(),
                tier: ClassTier::Kg,
            }],
        };

        seed_reference_data(&db, &config).await?;
        seed_reference_data(&db, &config).await?;

        assert_eq!(get_all_categories(&db).await?.len(), 2);
        assert_eq!(get_all_classes(&db).await?.len(), 1);

        Ok(())
    }

    #[test]
    fn test_pricing_context_resolution() {
        let (categories, classes) = sample_reference();
        let payer = sample_student(1, 1);

        let context = pricing_context_for(&payer, &categories, &classes);
        assert_eq!(context.category_name, "SVC");
        assert_eq!(context.tier, ClassTier::Basic5To6);
    }

    #[test]
    fn test_pricing_context_missing_lookups_default() {
        let payer = sample_student(42, 42);

        let context = pricing_context_for(&payer, &[], &[]);
        assert_eq!(context.category_name, "");
        assert_eq!(context.tier, ClassTier::General);
    }

    #[test]
    fn test_pricing_context_uppercases_category() {
        let categories = vec![category::Model {
            id: 1,
            name: "svc".to_string(),
        }];
        let payer = sample_student(1, 1);

        let context = pricing_context_for(&payer, &categories, &[]);
        assert_eq!(context.category_name, "SVC");
    }

    #[test]
    fn test_pricing_context_falls_back_to_name_classification() {
        // A row with a corrupt tier value still resolves via its name
        let classes = vec![school_class::Model {
            id: 1,
            name: "Basic 7".to_string(),
            tier: "not_a_tier".to_string(),
        }];
        let payer = sample_student(1, 1);

        let context = pricing_context_for(&payer, &[], &classes);
        assert_eq!(context.tier, ClassTier::Basic7To8);
    }
}
