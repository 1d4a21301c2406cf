//! Lead form — field registry, validation, step controller and session.

pub mod fields;
pub mod model;
pub mod session;
pub mod state;
pub mod validate;
pub mod view;

pub use fields::{FieldKind, FieldName, FieldSpec, FieldValue, FormValues, HONEYPOT_FIELD};
pub use model::{AiTimeline, Attribution, BusinessType, LeadSubmission, SalesChannel, Utm};
pub use session::{FormSession, SessionDeps, SubmitOutcome};
pub use state::{FormStep, TOTAL_STEPS};
pub use validate::{FieldError, WordCountHint};
pub use view::FormView;
