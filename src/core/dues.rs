//! Due-amount calculation - What a payer still owes.
//!
//! Pure functions over a payer, reference collections, and the set of
//! components already settled by prior receipts. Nothing here touches the
//! database or fails: missing lookups price defensively and a malformed sum
//! collapses to zero instead of propagating NaN.

use crate::core::{
    payer::Payer,
    pricing::{FeeComponent, price_of},
    reference::pricing_context_for,
};
use crate::entities::{category, school_class};
use std::collections::HashSet;

/// Lists the components a payer still owes, each with its current price.
///
/// The candidate set depends on the payer variant (only applicants owe
/// registration); components already in `paid` are excluded.
#[must_use]
pub fn outstanding_components(
    payer: &Payer,
    categories: &[category::Model],
    classes: &[school_class::Model],
    paid: &HashSet<FeeComponent>,
) -> Vec<(FeeComponent, f64)> {
    let context = pricing_context_for(payer, categories, classes);
    payer
        .candidate_components()
        .iter()
        .copied()
        .filter(|component| !paid.contains(component))
        .map(|component| (component, price_of(component, &context)))
        .collect()
}

/// Totals the outstanding components for a payer.
///
/// Returns 0.0 when no payer is selected, and coerces a non-finite sum to
/// 0.0 so display code never sees NaN. Components present in `paid` never
/// contribute to the total.
#[must_use]
pub fn calculate_total_due(
    payer: Option<&Payer>,
    categories: &[category::Model],
    classes: &[school_class::Model],
    paid: &HashSet<FeeComponent>,
) -> f64 {
    let Some(payer) = payer else {
        return 0.0;
    };

    let total: f64 = outstanding_components(payer, categories, classes, paid)
        .iter()
        .map(|(_, amount)| amount)
        .sum();

    if total.is_finite() { total } else { 0.0 }
}
