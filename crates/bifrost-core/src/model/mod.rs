// ── Domain model ──

pub mod form;
pub mod package;
pub mod selection;
pub mod site;
pub mod status;

pub use form::{ActivationType, FormField, SignupForm, SignupType};
pub use package::{PackageCatalog, PackageRestriction};
pub use selection::{SelectionState, UnitCardinality, UnitSelection};
pub use site::Site;
pub use status::{AntiAutomation, SubmissionStatus};
