//! Receipt draft editing - Accumulating fee components into one receipt.
//!
//! A draft is the in-progress, unsubmitted list of line items being prepared
//! for a payer. Rows are added blank, then assigned a component; selecting a
//! component that is already on another row, or that a prior receipt has
//! already settled, is rejected and leaves the draft untouched. Amounts
//! always come from the pricing table, and the draft can be repriced as a
//! whole when the payer or the reference data changes under it.
//!
//! Everything in this module is synchronous and in-memory; persistence and
//! the checks that need the receipt history live in
//! [`crate::core::receipt`].

use crate::{
    core::{
        payer::Payer,
        pricing::{FeeComponent, PricingContext, price_of},
    },
    errors::{Error, Result},
};
use std::collections::HashSet;

/// One editable line of a receipt draft.
#[derive(Clone, Debug, PartialEq)]
pub struct DraftRow {
    /// Selected fee component, None for a freshly added row
    pub component: Option<FeeComponent>,
    /// Amount priced for the component, 0 while unselected
    pub amount: f64,
}

/// An in-progress receipt: zero or more rows, each holding at most one
/// distinct fee component.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReceiptDraft {
    rows: Vec<DraftRow>,
}

impl ReceiptDraft {
    /// Creates an empty draft.
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// The current rows, in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[DraftRow] {
        &self.rows
    }

    /// Appends a blank row with no component and a zero amount.
    pub fn add_row(&mut self) {
        self.rows.push(DraftRow {
            component: None,
            amount: 0.0,
        });
    }

    /// Assigns a component to the row at `index` and prices it.
    ///
    /// # Errors
    /// Rejects without changing the draft when the component is already on
    /// another row ([`Error::DuplicateComponent`]), when it was settled by a
    /// prior receipt ([`Error::ComponentAlreadyPaid`]), or when `index` is
    /// out of range.
    pub fn select_component(
        &mut self,
        index: usize,
        component: FeeComponent,
        context: &PricingContext,
        paid: &HashSet<FeeComponent>,
    ) -> Result<()> {
        if index >= self.rows.len() {
            return Err(Error::Config {
                message: format!("No draft row at index {index}"),
            });
        }

        let duplicate = self
            .rows
            .iter()
            .enumerate()
            .any(|(i, row)| i != index && row.component == Some(component));
        if duplicate {
            return Err(Error::DuplicateComponent {
                component: component.as_str().to_string(),
            });
        }

        if paid.contains(&component) {
            return Err(Error::ComponentAlreadyPaid {
                component: component.as_str().to_string(),
            });
        }

        self.rows[index] = DraftRow {
            component: Some(component),
            amount: price_of(component, context),
        };
        Ok(())
    }

    /// Removes the row at `index`.
    ///
    /// # Errors
    /// Returns an error when `index` is out of range.
    pub fn remove_row(&mut self, index: usize) -> Result<()> {
        if index >= self.rows.len() {
            return Err(Error::Config {
                message: format!("No draft row at index {index}"),
            });
        }
        self.rows.remove(index);
        Ok(())
    }

    /// Sum of all row amounts.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|row| row.amount).sum()
    }

    /// Whether the draft has no rows at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether every row has a component selected.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rows.iter().all(|row| row.component.is_some())
    }

    /// The selected components, in row order.
    pub fn components(&self) -> impl Iterator<Item = FeeComponent> + '_ {
        self.rows.iter().filter_map(|row| row.component)
    }

    /// Whether any row carries the registration component.
    #[must_use]
    pub fn has_registration(&self) -> bool {
        self.components()
            .any(|component| component == FeeComponent::Registration)
    }

    /// True when a student payer has a registration row. The row is kept so
    /// the user can see and fix it, but submission is blocked while the
    /// flag holds.
    #[must_use]
    pub fn registration_warning(&self, payer: Option<&Payer>) -> bool {
        matches!(payer, Some(Payer::Student(_))) && self.has_registration()
    }

    /// Whether any row's amount is table-computed and not hand-editable.
    #[must_use]
    pub fn is_amount_locked(&self) -> bool {
        self.components().any(FeeComponent::locks_amount)
    }

    /// Reprices every selected row against a fresh context.
    ///
    /// Returns the repriced draft, or `None` when no amount changed, so
    /// callers can skip redundant state updates. Safe to call any number of
    /// times as reference data trickles in: repricing an already-current
    /// draft is a no-op.
    #[must_use]
    pub fn repriced(&self, context: &PricingContext) -> Option<Self> {
        let rows: Vec<DraftRow> = self
            .rows
            .iter()
            .map(|row| DraftRow {
                component: row.component,
                amount: row
                    .component
                    .map_or(row.amount, |component| price_of(component, context)),
            })
            .collect();

        if rows == self.rows {
            None
        } else {
            Some(Self { rows })
        }
    }

    /// Checks every submission precondition, returning the first violation.
    ///
    /// Registration drafts must be for an existing applicant without a
    /// prior registration receipt (`duplicate_registration` carries the
    /// history check); all other drafts must be for an existing student.
    ///
    /// # Errors
    /// Returns the specific validation error that blocks submission.
    pub fn validate_for_submission(
        &self,
        payer: Option<&Payer>,
        duplicate_registration: bool,
    ) -> Result<()> {
        if self.rows.is_empty() {
            return Err(Error::EmptyDraft);
        }
        if !self.is_complete() {
            return Err(Error::IncompleteDraft);
        }

        if self.has_registration() {
            match payer {
                Some(Payer::Applicant(applicant)) => {
                    if applicant.is_deleted {
                        return Err(Error::ApplicantNotFound { id: applicant.id });
                    }
                    if duplicate_registration {
                        return Err(Error::DuplicateRegistration {
                            applicant_id: applicant.id,
                        });
                    }
                }
                Some(Payer::Student(_)) => {
                    return Err(Error::ComponentNotAllowed {
                        component: FeeComponent::Registration.as_str().to_string(),
                    });
                }
                None => {
                    return Err(Error::MissingPayer {
                        required: "applicant",
                    });
                }
            }
        } else {
            match payer {
                Some(Payer::Student(student)) => {
                    if student.is_deleted {
                        return Err(Error::StudentNotFound { id: student.id });
                    }
                }
                Some(Payer::Applicant(_)) | None => {
                    return Err(Error::MissingPayer {
                        required: "student",
                    });
                }
            }
        }

        Ok(())
    }
}
