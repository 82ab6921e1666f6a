//! Pricing rule table - Pure fee component pricing.
//!
//! This module defines the fee component and class tier enumerations and the
//! single authoritative pricing table. Pricing is a pure lookup: given the
//! same component and context it always returns the same amount, performs no
//! I/O, and never fails. Unknown categories price the levy at zero and
//! unknown class names fall back to the general tier instead of erroring.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One named fee line item on a receipt.
///
/// Components are priced three ways: flat constants (registration,
/// furniture, jersey/crest), by fee category (levy), or by class tier
/// (books).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeComponent {
    /// One-time enrollment fee, applicants only
    Registration,
    /// Category-tiered term levy
    Levy,
    /// Flat furniture fee
    Furniture,
    /// Combined jersey and crest fee
    JerseyCrest,
    /// Jersey alone (currently free, priced on the jersey/crest combination)
    Jersey,
    /// Crest alone
    Crest,
    /// Class-tiered textbook fee
    TextBooks,
    /// Class-tiered exercise book fee
    ExerciseBooks,
}

/// Every component an applicant may be charged, registration included.
pub const APPLICANT_COMPONENTS: [FeeComponent; 8] = [
    FeeComponent::Registration,
    FeeComponent::Levy,
    FeeComponent::Furniture,
    FeeComponent::JerseyCrest,
    FeeComponent::Jersey,
    FeeComponent::Crest,
    FeeComponent::TextBooks,
    FeeComponent::ExerciseBooks,
];

/// Every component an enrolled student may be charged. Registration is
/// excluded: enrolled students are past it by definition.
pub const STUDENT_COMPONENTS: [FeeComponent; 7] = [
    FeeComponent::Levy,
    FeeComponent::Furniture,
    FeeComponent::JerseyCrest,
    FeeComponent::Jersey,
    FeeComponent::Crest,
    FeeComponent::TextBooks,
    FeeComponent::ExerciseBooks,
];

impl FeeComponent {
    /// Canonical name, as stored on receipt line items.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::Levy => "levy",
            Self::Furniture => "furniture",
            Self::JerseyCrest => "jersey_crest",
            Self::Jersey => "jersey",
            Self::Crest => "crest",
            Self::TextBooks => "text_books",
            Self::ExerciseBooks => "exercise_books",
        }
    }

    /// Whether an enrolled student may be charged this component.
    #[must_use]
    pub const fn allowed_for_student(self) -> bool {
        !matches!(self, Self::Registration)
    }

    /// Whether the amount is always computed from the pricing table and
    /// never entered by hand.
    #[must_use]
    pub const fn locks_amount(self) -> bool {
        matches!(
            self,
            Self::Levy | Self::Registration | Self::Furniture | Self::JerseyCrest
        )
    }
}

impl fmt::Display for FeeComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeeComponent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "registration" => Ok(Self::Registration),
            "levy" => Ok(Self::Levy),
            "furniture" => Ok(Self::Furniture),
            "jersey_crest" => Ok(Self::JerseyCrest),
            "jersey" => Ok(Self::Jersey),
            "crest" => Ok(Self::Crest),
            "text_books" => Ok(Self::TextBooks),
            "exercise_books" => Ok(Self::ExerciseBooks),
            _ => Err(Error::UnknownComponent {
                name: s.to_string(),
            }),
        }
    }
}

/// Pricing tier of a class level.
///
/// Every class is assigned a tier when it is created, so pricing lookups are
/// keyed by the stored tier rather than by matching the display name. The
/// [`ClassTier::classify`] helper derives a tier from a display name for
/// seeding and as a fallback for rows with an unrecognized tier value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassTier {
    /// Kindergarten classes
    #[serde(rename = "kg")]
    Kg,
    /// Basic 1 and Basic 2
    #[serde(rename = "basic_1_2")]
    Basic1To2,
    /// Basic 3 and Basic 4
    #[serde(rename = "basic_3_4")]
    Basic3To4,
    /// Basic 5 and Basic 6
    #[serde(rename = "basic_5_6")]
    Basic5To6,
    /// Basic 7 and Basic 8
    #[serde(rename = "basic_7_8")]
    Basic7To8,
    /// Fallback tier for anything else
    #[default]
    #[serde(rename = "general")]
    General,
}

impl ClassTier {
    /// Canonical tier name, as stored on class rows and used in config.toml.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Basic1To2 => "basic_1_2",
            Self::Basic3To4 => "basic_3_4",
            Self::Basic5To6 => "basic_5_6",
            Self::Basic7To8 => "basic_7_8",
            Self::General => "general",
        }
    }

    /// Derives a tier from a class display name.
    ///
    /// The name is trimmed and lowercased, then matched as "kg" or
    /// "basic N". N is parsed numerically, so "Basic 10" lands on
    /// [`Self::General`] rather than colliding with "Basic 1". Names that
    /// match neither pattern land on [`Self::General`].
    #[must_use]
    pub fn classify(name: &str) -> Self {
        let normalized = name.trim().to_lowercase();
        if normalized.contains("kg") {
            return Self::Kg;
        }
        if let Some(rest) = normalized.strip_prefix("basic") {
            let level = rest
                .trim_start()
                .split_whitespace()
                .next()
                .and_then(|token| token.parse::<u8>().ok());
            return match level {
                Some(1 | 2) => Self::Basic1To2,
                Some(3 | 4) => Self::Basic3To4,
                Some(5 | 6) => Self::Basic5To6,
                Some(7 | 8) => Self::Basic7To8,
                _ => Self::General,
            };
        }
        Self::General
    }
}

impl fmt::Display for ClassTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "kg" => Ok(Self::Kg),
            "basic_1_2" => Ok(Self::Basic1To2),
            "basic_3_4" => Ok(Self::Basic3To4),
            "basic_5_6" => Ok(Self::Basic5To6),
            "basic_7_8" => Ok(Self::Basic7To8),
            "general" => Ok(Self::General),
            _ => Err(Error::Config {
                message: format!("Unknown class tier '{s}'"),
            }),
        }
    }
}

/// Resolved pricing inputs for one payer.
///
/// Built from reference data lookups; a payer whose category or class cannot
/// be resolved gets an empty category name and the general tier, which price
/// defensively rather than erroring.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PricingContext {
    /// Uppercased category code, empty when the lookup failed
    pub category_name: String,
    /// Pricing tier of the payer's class
    pub tier: ClassTier,
}

impl PricingContext {
    /// Builds a context, normalizing the category code to uppercase.
    #[must_use]
    pub fn new(category_name: &str, tier: ClassTier) -> Self {
        Self {
            category_name: category_name.trim().to_uppercase(),
            tier,
        }
    }
}

/// Prices one fee component in the given context.
///
/// Pure and deterministic. The levy is tiered by category code and the book
/// components by class tier; everything else is a flat constant.
#[must_use]
pub fn price_of(component: FeeComponent, context: &PricingContext) -> f64 {
    match component {
        FeeComponent::Registration => 40.0,
        FeeComponent::Furniture => 100.0,
        FeeComponent::JerseyCrest => 120.0,
        FeeComponent::Jersey => 0.0,
        FeeComponent::Crest => 10.0,
        FeeComponent::Levy => match context.category_name.as_str() {
            "SVC" | "MOD" => 200.0,
            "CIV" => 220.0,
            _ => 0.0,
        },
        FeeComponent::TextBooks => match context.tier {
            ClassTier::Kg => 100.0,
            ClassTier::Basic1To2 => 120.0,
            ClassTier::Basic3To4 => 150.0,
            ClassTier::Basic5To6 => 180.0,
            ClassTier::Basic7To8 | ClassTier::General => 200.0,
        },
        FeeComponent::ExerciseBooks => match context.tier {
            ClassTier::Kg => 30.0,
            ClassTier::Basic1To2 => 50.0,
            ClassTier::Basic3To4 => 60.0,
            ClassTier::Basic5To6 => 70.0,
            ClassTier::Basic7To8 => 80.0,
            ClassTier::General => 50.0,
        },
    }
}
