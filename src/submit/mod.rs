//! Entry mapping and delivery to the ingestion endpoint.

pub mod client;
pub mod entries;

pub use client::{FormIngest, GoogleFormsClient};
pub use entries::{AttributionField, EntryMap, EntryPayload};
