//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod applicant;
pub mod category;
pub mod receipt;
pub mod receipt_item;
pub mod school_class;
pub mod student;

// Re-export specific types to avoid conflicts
pub use applicant::{Column as ApplicantColumn, Entity as Applicant, Model as ApplicantModel};
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use receipt::{Column as ReceiptColumn, Entity as Receipt, Model as ReceiptModel};
pub use receipt_item::{
    Column as ReceiptItemColumn, Entity as ReceiptItem, Model as ReceiptItemModel,
};
pub use school_class::{
    Column as SchoolClassColumn, Entity as SchoolClass, Model as SchoolClassModel,
};
pub use student::{Column as StudentColumn, Entity as Student, Model as StudentModel};
