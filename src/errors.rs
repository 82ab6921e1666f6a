//! Unified error types and result handling for the fee service.
//!
//! All fallible operations in the crate return [`Result`]. Validation
//! failures (duplicate components, missing payers, registration rules) get
//! their own variants so callers can surface precise messages; I/O and
//! database failures are wrapped via `#[from]` conversions.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or validation failure
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// Any database-level failure, converted from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem failure (e.g. reading config.toml)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Amount is negative, NaN, or infinite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending amount
        amount: f64,
    },

    /// Referenced student does not exist or has been removed
    #[error("Student {id} not found")]
    StudentNotFound {
        /// Student id that failed to resolve
        id: i64,
    },

    /// Referenced applicant does not exist or has been removed
    #[error("Applicant {id} not found")]
    ApplicantNotFound {
        /// Applicant id that failed to resolve
        id: i64,
    },

    /// Referenced receipt does not exist
    #[error("Receipt {id} not found")]
    ReceiptNotFound {
        /// Receipt id that failed to resolve
        id: i64,
    },

    /// A fee component name that is not part of the known set
    #[error("Unknown fee component '{name}'")]
    UnknownComponent {
        /// The unrecognized component name
        name: String,
    },

    /// Submission attempted with no line items in the draft
    #[error("Receipt draft has no line items")]
    EmptyDraft,

    /// Submission attempted while a row has no component selected yet
    #[error("Receipt draft has a row without a fee component selected")]
    IncompleteDraft,

    /// The component is already present on another row of the draft
    #[error("Fee component '{component}' is already in this draft")]
    DuplicateComponent {
        /// Canonical component name
        component: String,
    },

    /// The component was already settled by a prior receipt for this payer
    #[error("Fee component '{component}' has already been paid")]
    ComponentAlreadyPaid {
        /// Canonical component name
        component: String,
    },

    /// The component cannot be charged to this kind of payer
    #[error("Fee component '{component}' cannot be charged to this payer")]
    ComponentNotAllowed {
        /// Canonical component name
        component: String,
    },

    /// No payer, or the wrong kind of payer, is selected for the draft
    #[error("No {required} selected for this receipt")]
    MissingPayer {
        /// The kind of payer the draft requires ("student" or "applicant")
        required: &'static str,
    },

    /// The applicant already holds a registration receipt
    #[error("Applicant {applicant_id} already has a registration receipt")]
    DuplicateRegistration {
        /// The applicant the second registration was attempted for
        applicant_id: i64,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
