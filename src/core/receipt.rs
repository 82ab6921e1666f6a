//! Receipt business logic - History guards and receipt issuance.
//!
//! Issuance is the only write path for receipts and re-checks the submission
//! rules (payer kind, component distinctness and legality, paid history), so
//! an ill-formed submission is rejected here even if it bypassed the draft
//! editor. The receipt header and its line items are written in one database
//! transaction; the follow-up that marks an applicant's registration as paid
//! runs after commit and is best-effort: its failure is logged and reported
//! on the result, never rolled back into the already-issued receipt.

use crate::{
    core::{
        draft::ReceiptDraft,
        payer::{self, Payer},
        pricing::FeeComponent,
    },
    entities::{Receipt, ReceiptItem, receipt, receipt_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::HashSet;
use tracing::warn;

/// Outcome of a successful issuance.
#[derive(Debug, Clone)]
pub struct IssuedReceipt {
    /// The persisted receipt header
    pub receipt: receipt::Model,
    /// The persisted line items, in draft row order
    pub items: Vec<receipt_item::Model>,
    /// True when the receipt was created but the applicant's payment status
    /// could not be updated afterwards
    pub status_update_failed: bool,
}

/// Scans issued receipts for a registration line item owned by the given
/// applicant. Pure; used by [`applicant_has_registration_receipt`] and
/// directly when the receipts are already in hand.
#[must_use]
pub fn has_registration_receipt(
    applicant_id: i64,
    receipts: &[(receipt::Model, Vec<receipt_item::Model>)],
) -> bool {
    receipts.iter().any(|(header, items)| {
        header.applicant_id == Some(applicant_id)
            && items
                .iter()
                .any(|item| item.component == FeeComponent::Registration.as_str())
    })
}

/// Checks the persisted receipt history for a prior registration receipt.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn applicant_has_registration_receipt(
    db: &DatabaseConnection,
    applicant_id: i64,
) -> Result<bool> {
    let receipts = Receipt::find()
        .filter(receipt::Column::ApplicantId.eq(applicant_id))
        .find_with_related(ReceiptItem)
        .all(db)
        .await?;
    Ok(has_registration_receipt(applicant_id, &receipts))
}

/// Collects the fee components already settled for a payer across all of
/// their receipts.
///
/// Line items with an unrecognized component name are skipped with a
/// warning so one bad row cannot take the whole payment page down.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn paid_components(
    db: &DatabaseConnection,
    payer: &Payer,
) -> Result<HashSet<FeeComponent>> {
    let filter = match payer {
        Payer::Student(student) => receipt::Column::StudentId.eq(student.id),
        Payer::Applicant(applicant) => receipt::Column::ApplicantId.eq(applicant.id),
    };

    let receipts = Receipt::find()
        .filter(filter)
        .find_with_related(ReceiptItem)
        .all(db)
        .await?;

    let mut paid = HashSet::new();
    for (_, items) in receipts {
        for item in items {
            match item.component.parse::<FeeComponent>() {
                Ok(component) => {
                    paid.insert(component);
                }
                Err(_) => {
                    warn!(
                        receipt_id = item.receipt_id,
                        component = %item.component,
                        "Skipping line item with unknown component"
                    );
                }
            }
        }
    }
    Ok(paid)
}

/// Retrieves all receipts for a payer, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_receipts_for_payer(
    db: &DatabaseConnection,
    payer: &Payer,
) -> Result<Vec<receipt::Model>> {
    let filter = match payer {
        Payer::Student(student) => receipt::Column::StudentId.eq(student.id),
        Payer::Applicant(applicant) => receipt::Column::ApplicantId.eq(applicant.id),
    };

    Receipt::find()
        .filter(filter)
        .order_by_desc(receipt::Column::DateIssued)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a receipt header by its unique ID.
///
/// # Errors
/// Returns [`Error::ReceiptNotFound`] if the receipt does not exist, or an
/// error if the database query fails.
pub async fn get_receipt_by_id(
    db: &DatabaseConnection,
    receipt_id: i64,
) -> Result<receipt::Model> {
    Receipt::find_by_id(receipt_id)
        .one(db)
        .await?
        .ok_or(Error::ReceiptNotFound { id: receipt_id })
}

/// Retrieves one receipt together with its line items, e.g. for the
/// printable rendition.
///
/// # Errors
/// Returns [`Error::ReceiptNotFound`] if the receipt does not exist, or an
/// error if the database query fails.
pub async fn get_receipt_with_items(
    db: &DatabaseConnection,
    receipt_id: i64,
) -> Result<(receipt::Model, Vec<receipt_item::Model>)> {
    let header = Receipt::find_by_id(receipt_id)
        .one(db)
        .await?
        .ok_or(Error::ReceiptNotFound { id: receipt_id })?;

    let items = header.find_related(ReceiptItem).all(db).await?;
    Ok((header, items))
}

/// Issues a receipt for the finalized draft.
///
/// Re-runs every submission rule against the persisted history, then writes
/// the header and all line items in one transaction. Exactly one of the
/// payer foreign keys is set; the header amount is the sum of the item
/// amounts. For registration receipts the applicant's payment status is
/// updated after commit, best-effort.
///
/// # Errors
/// Returns a validation error before anything is written, or a database
/// error if the transaction fails. A failure of the post-commit status
/// update is NOT an error; it is reported via
/// [`IssuedReceipt::status_update_failed`].
pub async fn issue_receipt(
    db: &DatabaseConnection,
    payer: &Payer,
    draft: &ReceiptDraft,
    payment_type: String,
    venue: Option<String>,
) -> Result<IssuedReceipt> {
    if payment_type.trim().is_empty() {
        return Err(Error::Config {
            message: "Payment type cannot be empty".to_string(),
        });
    }

    let duplicate_registration = match payer {
        Payer::Applicant(applicant) => {
            applicant_has_registration_receipt(db, applicant.id).await?
        }
        Payer::Student(_) => false,
    };
    draft.validate_for_submission(Some(payer), duplicate_registration)?;

    let paid = paid_components(db, payer).await?;
    let mut seen = HashSet::new();
    for component in draft.components() {
        if !seen.insert(component) {
            return Err(Error::DuplicateComponent {
                component: component.as_str().to_string(),
            });
        }
        if paid.contains(&component) {
            return Err(Error::ComponentAlreadyPaid {
                component: component.as_str().to_string(),
            });
        }
    }

    let total = draft.total();
    if !total.is_finite() || total < 0.0 {
        return Err(Error::InvalidAmount { amount: total });
    }

    // Header and items land atomically
    let txn = db.begin().await?;

    let (student_id, applicant_id) = match payer {
        Payer::Student(student) => (Some(student.id), None),
        Payer::Applicant(applicant) => (None, Some(applicant.id)),
    };

    let header = receipt::ActiveModel {
        student_id: Set(student_id),
        applicant_id: Set(applicant_id),
        date_issued: Set(chrono::Utc::now()),
        amount: Set(total),
        payment_type: Set(payment_type.trim().to_string()),
        venue: Set(venue),
        ..Default::default()
    };
    let header = header.insert(&txn).await?;

    let mut items = Vec::with_capacity(draft.rows().len());
    for row in draft.rows() {
        // validate_for_submission guarantees completeness
        let Some(component) = row.component else {
            continue;
        };
        let item = receipt_item::ActiveModel {
            receipt_id: Set(header.id),
            component: Set(component.as_str().to_string()),
            amount: Set(row.amount),
            ..Default::default()
        };
        items.push(item.insert(&txn).await?);
    }

    txn.commit().await?;

    let mut status_update_failed = false;
    if let Payer::Applicant(applicant) = payer {
        if draft.has_registration() {
            if let Err(e) = payer::mark_applicant_paid(db, applicant.id).await {
                warn!(
                    applicant_id = applicant.id,
                    receipt_id = header.id,
                    error = %e,
                    "Receipt issued but applicant payment status update failed"
                );
                status_update_failed = true;
            }
        }
    }

    Ok(IssuedReceipt {
        receipt: header,
        items,
        status_update_failed,
    })
}
