//! Analytics data layer — append-only queue of named events.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

use super::AnalyticsSink;

pub const EVENT_STEP_VIEW: &str = "form_step_view";
pub const EVENT_STEP_NEXT: &str = "form_step_next";
pub const EVENT_VALIDATION_ERROR: &str = "form_validation_error";
pub const EVENT_SUBMIT: &str = "form_submit";

/// One entry in the data layer: `{ "event": name, ...payload }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub event: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl AnalyticsEvent {
    /// Build an event from a JSON object payload; non-object payloads are dropped.
    pub fn new(event: impl Into<String>, payload: Value) -> Self {
        let payload = match payload {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            event: event.into(),
            payload,
        }
    }

    pub fn step_view(step: u8, path: &str) -> Self {
        Self::new(EVENT_STEP_VIEW, json!({ "step": step, "path": path }))
    }

    pub fn step_next(from: u8, to: u8) -> Self {
        Self::new(EVENT_STEP_NEXT, json!({ "from": from, "to": to }))
    }

    pub fn validation_error(step: u8, field: &str, message: &str) -> Self {
        Self::new(
            EVENT_VALIDATION_ERROR,
            json!({ "step": step, "field": field, "message": message }),
        )
    }

    pub fn submitted(lead_type: &str) -> Self {
        Self::new(EVENT_SUBMIT, json!({ "valid": true, "lead_type": lead_type }))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

/// In-process analytics queue. Events are only ever appended.
#[derive(Debug, Default)]
pub struct DataLayer {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl DataLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event pushed so far, oldest first.
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Events with the given name, oldest first.
    pub fn named(&self, event: &str) -> Vec<AnalyticsEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.event == event)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AnalyticsSink for DataLayer {
    fn push(&self, event: AnalyticsEvent) {
        debug!(event = %event.event, payload = ?event.payload, "Analytics event");
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
