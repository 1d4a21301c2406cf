//! Draft record — the serialized snapshot of every field value.
//!
//! Written on every change, read once on mount, removed after a successful
//! submission. A record that cannot be parsed is discarded rather than
//! blocking the form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::traits::DraftStore;
use crate::error::StorageError;
use crate::form::fields::{FIELDS, FieldKind, FieldName, FieldValue, FormValues};

/// Storage key holding the draft.
pub const DRAFT_KEY: &str = "multiStepFormData";

/// One stored value: a scalar, or the ordered list of a multi-choice group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DraftValue {
    One(String),
    Many(Vec<String>),
    /// Anything else found in storage; ignored on restore.
    Other(serde_json::Value),
}

/// Field key → stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftRecord(pub BTreeMap<String, DraftValue>);

impl DraftRecord {
    /// Snapshot the current values. Unselected single choices are omitted.
    pub fn capture(values: &FormValues) -> Self {
        let mut record = BTreeMap::new();
        for spec in FIELDS {
            let value = match values.get(spec.name) {
                FieldValue::Text(text) => DraftValue::One(text.clone()),
                FieldValue::Choice(Some(choice)) => DraftValue::One(choice.clone()),
                FieldValue::Choice(None) => continue,
                FieldValue::Multi(selected) => DraftValue::Many(selected.clone()),
            };
            record.insert(spec.name.key().to_string(), value);
        }
        Self(record)
    }

    /// Copy stored values onto `values`. Returns how many fields got a value.
    ///
    /// Unknown keys, unknown options and wrong-shaped values are skipped.
    pub fn apply(&self, values: &mut FormValues) -> usize {
        let mut restored = 0;
        for (key, stored) in &self.0 {
            let Some(field) = FieldName::from_key(key) else {
                debug!(key, "Ignoring unknown draft key");
                continue;
            };
            let applied = match (field.spec().kind, stored) {
                (FieldKind::Text, DraftValue::One(text)) => {
                    values.set_text(field, text.as_str()).is_ok() && !text.is_empty()
                }
                (FieldKind::SingleChoice(options), DraftValue::One(choice)) => {
                    options.contains(&choice.as_str())
                        && values.select(field, Some(choice.as_str())).is_ok()
                }
                (FieldKind::MultiChoice(options), DraftValue::Many(selected)) => {
                    let known: Vec<&str> = selected
                        .iter()
                        .map(String::as_str)
                        .filter(|s| options.contains(s))
                        .collect();
                    values.set_selected(field, known.as_slice()).is_ok() && !known.is_empty()
                }
                _ => {
                    debug!(key, "Ignoring draft value of unexpected shape");
                    false
                }
            };
            if applied {
                restored += 1;
            }
        }
        restored
    }
}

/// What happened when the draft was loaded on mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Nothing stored (or storage unavailable).
    Empty,
    /// A record was applied; `fields` got a non-empty value.
    Restored { fields: usize },
    /// The stored record was unreadable and has been removed.
    Discarded { reason: String },
}

/// Serialize `values` and write them under [`DRAFT_KEY`].
pub async fn save_draft(store: &dyn DraftStore, values: &FormValues) -> Result<(), StorageError> {
    let json = serde_json::to_string(&DraftRecord::capture(values))?;
    store.set(DRAFT_KEY, &json).await
}

/// Load the stored draft into `values`.
///
/// Storage failures and corrupt records never propagate: both are logged,
/// a corrupt record is deleted so it is not hit again, and the form starts
/// from whatever `values` already held.
pub async fn restore_draft(store: &dyn DraftStore, values: &mut FormValues) -> RestoreOutcome {
    let raw = match store.get(DRAFT_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return RestoreOutcome::Empty,
        Err(e) => {
            warn!(error = %e, "Failed to read saved form draft");
            return RestoreOutcome::Empty;
        }
    };

    match serde_json::from_str::<DraftRecord>(&raw) {
        Ok(record) => {
            let fields = record.apply(values);
            info!(fields, "Restored saved form draft");
            RestoreOutcome::Restored { fields }
        }
        Err(e) => {
            warn!(error = %e, "Discarding unreadable form draft");
            if let Err(e) = store.remove(DRAFT_KEY).await {
                warn!(error = %e, "Failed to remove unreadable form draft");
            }
            RestoreOutcome::Discarded {
                reason: e.to_string(),
            }
        }
    }
}

/// Remove the stored draft.
pub async fn clear_draft(store: &dyn DraftStore) -> Result<bool, StorageError> {
    store.remove(DRAFT_KEY).await
}
