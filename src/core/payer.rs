//! Payer business logic - Students, applicants, and the payer union.
//!
//! A payer is whoever a receipt is issued to: an enrolled student or a
//! not-yet-enrolled applicant. The two differ in which class reference they
//! carry and in whether the one-time registration component applies, so the
//! rest of the crate works with the [`Payer`] union and matches on the
//! variant instead of probing fields. Lookups and creation are async and
//! return Result types for error handling.

use crate::{
    core::pricing::{APPLICANT_COMPONENTS, FeeComponent, STUDENT_COMPONENTS},
    entities::{Applicant, Student, applicant, student},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Registration not yet paid for.
pub const PAYMENT_STATUS_PENDING: &str = "pending";
/// Registration settled by an issued receipt.
pub const PAYMENT_STATUS_PAID: &str = "paid";

/// The payer a receipt draft is being prepared for.
#[derive(Clone, Debug, PartialEq)]
pub enum Payer {
    /// An enrolled student
    Student(student::Model),
    /// A prospective applicant
    Applicant(applicant::Model),
}

impl Payer {
    /// Identifier of the underlying student or applicant.
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::Student(s) => s.id,
            Self::Applicant(a) => a.id,
        }
    }

    /// Display name of the payer.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Student(s) => &s.name,
            Self::Applicant(a) => &a.name,
        }
    }

    /// Fee category reference, present on both variants.
    #[must_use]
    pub const fn category_id(&self) -> i64 {
        match self {
            Self::Student(s) => s.category_id,
            Self::Applicant(a) => a.category_id,
        }
    }

    /// Class reference: the attended class for students, the class applied
    /// for otherwise.
    #[must_use]
    pub const fn class_id(&self) -> i64 {
        match self {
            Self::Student(s) => s.class_id,
            Self::Applicant(a) => a.class_applying_for,
        }
    }

    /// Whether this payer is an applicant.
    #[must_use]
    pub const fn is_applicant(&self) -> bool {
        matches!(self, Self::Applicant(_))
    }

    /// The fee components this payer may be charged. Only applicants get
    /// the registration component.
    #[must_use]
    pub const fn candidate_components(&self) -> &'static [FeeComponent] {
        match self {
            Self::Student(_) => &STUDENT_COMPONENTS,
            Self::Applicant(_) => &APPLICANT_COMPONENTS,
        }
    }
}

/// A payer selection, as made on the payment page: one student or one
/// applicant by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayerSelection {
    /// An enrolled student by id
    Student(i64),
    /// An applicant by id
    Applicant(i64),
}

/// Resolves a payer selection into a [`Payer`].
///
/// Soft-deleted students and applicants resolve as not found, so a receipt
/// can never be drafted against a payer that is no longer in the system.
///
/// # Errors
/// Returns [`Error::StudentNotFound`] or [`Error::ApplicantNotFound`] when
/// the selected payer does not exist or is deleted, or an error if the
/// database query fails.
pub async fn get_payer(db: &DatabaseConnection, selection: PayerSelection) -> Result<Payer> {
    match selection {
        PayerSelection::Student(id) => get_student_by_id(db, id)
            .await?
            .filter(|student| !student.is_deleted)
            .map(Payer::Student)
            .ok_or(Error::StudentNotFound { id }),
        PayerSelection::Applicant(id) => get_applicant_by_id(db, id)
            .await?
            .filter(|applicant| !applicant.is_deleted)
            .map(Payer::Applicant)
            .ok_or(Error::ApplicantNotFound { id }),
    }
}

/// Retrieves all active (non-deleted) students, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_active_students(db: &DatabaseConnection) -> Result<Vec<student::Model>> {
    Student::find()
        .filter(student::Column::IsDeleted.eq(false))
        .order_by_asc(student::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific student by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_student_by_id(
    db: &DatabaseConnection,
    student_id: i64,
) -> Result<Option<student::Model>> {
    Student::find_by_id(student_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all active (non-deleted) applicants, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_active_applicants(db: &DatabaseConnection) -> Result<Vec<applicant::Model>> {
    Applicant::find()
        .filter(applicant::Column::IsDeleted.eq(false))
        .order_by_asc(applicant::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific applicant by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_applicant_by_id(
    db: &DatabaseConnection,
    applicant_id: i64,
) -> Result<Option<applicant::Model>> {
    Applicant::find_by_id(applicant_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new student, performing input validation.
///
/// The name is trimmed and must not be empty. New students start out not
/// deleted.
///
/// # Errors
/// Returns an error if the name is empty or the database insert fails.
pub async fn create_student(
    db: &DatabaseConnection,
    name: String,
    category_id: i64,
    class_id: i64,
) -> Result<student::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Student name cannot be empty".to_string(),
        });
    }

    let student = student::ActiveModel {
        name: Set(name.trim().to_string()),
        category_id: Set(category_id),
        class_id: Set(class_id),
        is_deleted: Set(false),
        ..Default::default()
    };
    student.insert(db).await.map_err(Into::into)
}

/// Creates a new applicant, performing input validation.
///
/// The name is trimmed and must not be empty. New applicants start with a
/// pending payment status.
///
/// # Errors
/// Returns an error if the name is empty or the database insert fails.
pub async fn create_applicant(
    db: &DatabaseConnection,
    name: String,
    category_id: i64,
    class_applying_for: i64,
) -> Result<applicant::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Applicant name cannot be empty".to_string(),
        });
    }

    let applicant = applicant::ActiveModel {
        name: Set(name.trim().to_string()),
        category_id: Set(category_id),
        class_applying_for: Set(class_applying_for),
        payment_status: Set(PAYMENT_STATUS_PENDING.to_string()),
        is_deleted: Set(false),
        ..Default::default()
    };
    applicant.insert(db).await.map_err(Into::into)
}

/// Marks an applicant's registration as paid.
///
/// This is the follow-up step after a registration receipt has been issued.
/// It only touches `payment_status`; the receipt itself is already
/// committed by the time this runs.
///
/// # Errors
/// Returns [`Error::ApplicantNotFound`] if the applicant does not exist, or
/// an error if the database update fails.
pub async fn mark_applicant_paid(
    db: &DatabaseConnection,
    applicant_id: i64,
) -> Result<applicant::Model> {
    let applicant = Applicant::find_by_id(applicant_id)
        .one(db)
        .await?
        .ok_or(Error::ApplicantNotFound { id: applicant_id })?;

    let mut active: applicant::ActiveModel = applicant.into();
    active.payment_status = Set(PAYMENT_STATUS_PAID.to_string());
    active.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn test_payer_accessors_by_variant() {
        let student = student::Model {
            id: 7,
            name: "Ama Mensah".to_string(),
            category_id: 1,
            class_id: 3,
            is_deleted: false,
        };
        let applicant = applicant::Model {
            id: 9,
            name: "Kofi Boateng".to_string(),
            category_id: 2,
            class_applying_for: 4,
            payment_status: PAYMENT_STATUS_PENDING.to_string(),
            is_deleted: false,
        };

        let student_payer = Payer::Student(student);
        assert_eq!(student_payer.id(), 7);
        assert_eq!(student_payer.category_id(), 1);
        assert_eq!(student_payer.class_id(), 3);
        assert!(!student_payer.is_applicant());

        let applicant_payer = Payer::Applicant(applicant);
        assert_eq!(applicant_payer.id(), 9);
        assert_eq!(applicant_payer.category_id(), 2);
        assert_eq!(applicant_payer.class_id(), 4);
        assert!(applicant_payer.is_applicant());
    }

    #[test]
    fn test_candidate_components_by_variant() {
        let student_payer = sample_student(1, 1);
        let applicant_payer = sample_applicant(1, 1);

        assert!(
            !student_payer
                .candidate_components()
                .contains(&FeeComponent::Registration)
        );
        assert!(
            applicant_payer
                .candidate_components()
                .contains(&FeeComponent::Registration)
        );
    }

    #[tokio::test]
    async fn test_create_student_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_student(&db, "   ".to_string(), 1, 1).await;
        assert!(matches!(result.unwrap_err(), Error::Config { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_applicant_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_applicant(&db, String::new(), 1, 1).await;
        assert!(matches!(result.unwrap_err(), Error::Config { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_student_trims_name() -> Result<()> {
        let (db, category, class) = setup_with_reference().await?;

        let student = create_student(&db, "  Ama Mensah  ".to_string(), category.id, class.id)
            .await?;
        assert_eq!(student.name, "Ama Mensah");
        assert!(!student.is_deleted);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_applicant_starts_pending() -> Result<()> {
        let (db, category, class) = setup_with_reference().await?;

        let applicant =
            create_applicant(&db, "Kofi Boateng".to_string(), category.id, class.id).await?;
        assert_eq!(applicant.payment_status, PAYMENT_STATUS_PENDING);
        assert_eq!(applicant.class_applying_for, class.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_active_students_filters_deleted() -> Result<()> {
        let (db, category, class) = setup_with_reference().await?;

        let keep = create_test_student(&db, "Keep", category.id, class.id).await?;
        let remove = create_test_student(&db, "Remove", category.id, class.id).await?;

        let mut active: student::ActiveModel = remove.into();
        active.is_deleted = Set(true);
        active.update(&db).await?;

        let students = get_all_active_students(&db).await?;
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].id, keep.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_active_applicants_ordered_by_name() -> Result<()> {
        let (db, category, class) = setup_with_reference().await?;

        create_test_applicant(&db, "Yaw", category.id, class.id).await?;
        create_test_applicant(&db, "Abena", category.id, class.id).await?;

        let applicants = get_all_active_applicants(&db).await?;
        assert_eq!(applicants.len(), 2);
        assert_eq!(applicants[0].name, "Abena");
        assert_eq!(applicants[1].name, "Yaw");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_payer_resolves_selection() -> Result<()> {
        let (db, category, class) = setup_with_reference().await?;
        let student = create_test_student(&db, "Ama", category.id, class.id).await?;
        let applicant = create_test_applicant(&db, "Kofi", category.id, class.id).await?;

        let payer = get_payer(&db, PayerSelection::Student(student.id)).await?;
        assert_eq!(payer, Payer::Student(student));

        let payer = get_payer(&db, PayerSelection::Applicant(applicant.id)).await?;
        assert_eq!(payer, Payer::Applicant(applicant));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_payer_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = get_payer(&db, PayerSelection::Student(999)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::StudentNotFound { id: 999 }
        ));

        let result = get_payer(&db, PayerSelection::Applicant(999)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ApplicantNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_payer_treats_deleted_as_not_found() -> Result<()> {
        let (db, category, class) = setup_with_reference().await?;
        let student = create_test_student(&db, "Gone", category.id, class.id).await?;
        let student_id = student.id;

        let mut active: student::ActiveModel = student.into();
        active.is_deleted = Set(true);
        active.update(&db).await?;

        let result = get_payer(&db, PayerSelection::Student(student_id)).await;
        assert!(matches!(result.unwrap_err(), Error::StudentNotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_mark_applicant_paid() -> Result<()> {
        let (db, category, class) = setup_with_reference().await?;
        let applicant = create_test_applicant(&db, "Kofi", category.id, class.id).await?;
        assert_eq!(applicant.payment_status, PAYMENT_STATUS_PENDING);

        let updated = mark_applicant_paid(&db, applicant.id).await?;
        assert_eq!(updated.payment_status, PAYMENT_STATUS_PAID);

        let reloaded = get_applicant_by_id(&db, applicant.id).await?.unwrap();
        assert_eq!(reloaded.payment_status, PAYMENT_STATUS_PAID);

        Ok(())
    }

    #[tokio::test]
    async fn test_mark_applicant_paid_not_found() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<applicant::Model>::new()])
            .into_connection();

        let result = mark_applicant_paid(&db, 999).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ApplicantNotFound { id: 999 }
        ));

        Ok(())
    }
}
