// ── In-memory form state ──

pub mod form_state;
pub mod reference;

pub use form_state::FormState;
pub use reference::{ReferenceData, UnitsRequest};
