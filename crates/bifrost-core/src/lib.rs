// bifrost-core: Form state, validation and submission workflow between bifrost-api and the CLI.

pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod payload;
pub mod store;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{FormVariant, SignupConfig};
pub use controller::{PendingSubmission, SignupController};
pub use error::{CoreError, GENERIC_SUBMIT_ERROR, SubmitBlocked};
pub use store::{FormState, ReferenceData, UnitsRequest};
pub use validate::{FieldIssue, RequiredField, is_valid_email};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    ActivationType, AntiAutomation, FormField, PackageCatalog, PackageRestriction,
    SelectionState, SignupForm, SignupType, Site, SubmissionStatus, UnitCardinality,
    UnitSelection,
};

// Wire types consumers see through the controller.
pub use bifrost_api::{SignupReceipt, SignupRequest, UnitNumber};
