//! Local durable storage for the in-progress draft.

pub mod draft;
pub mod libsql_backend;
pub mod memory;
pub mod migrations;
pub mod traits;

pub use draft::{DRAFT_KEY, DraftRecord, DraftValue, RestoreOutcome};
pub use libsql_backend::LibSqlDraftStore;
pub use memory::MemoryDraftStore;
pub use traits::DraftStore;
