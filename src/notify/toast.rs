//! Toast notifications — short-lived messages that dismiss themselves.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::Notifier;

/// How long a toast stays on screen.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Error,
    Success,
}

#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub kind: ToastKind,
    pub shown_at: DateTime<Utc>,
}

/// The set of toasts currently on screen.
#[derive(Debug, Clone)]
pub struct ToastRack {
    toasts: Arc<Mutex<Vec<Toast>>>,
    ttl: Duration,
}

impl ToastRack {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TOAST_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            toasts: Arc::new(Mutex::new(Vec::new())),
            ttl,
        }
    }

    /// Toasts still visible, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|toasts| toasts.clone())
            .unwrap_or_default()
    }

    /// Remove a toast before its timer runs out.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let Ok(mut toasts) = self.toasts.lock() else {
            return false;
        };
        let before = toasts.len();
        toasts.retain(|t| t.id != id);
        toasts.len() != before
    }
}

impl Default for ToastRack {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastRack {
    fn toast(&self, message: &str, kind: ToastKind) {
        let toast = Toast {
            id: Uuid::new_v4(),
            message: message.to_string(),
            kind,
            shown_at: Utc::now(),
        };
        let id = toast.id;
        info!(toast_id = %id, ?kind, text = message, "Toast shown");

        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let rack = self.clone();
        let ttl = self.ttl;
        handle.spawn(async move {
            tokio::time::sleep(ttl).await;
            rack.dismiss(id);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn toast_dismisses_after_ttl() {
        let rack = ToastRack::with_ttl(Duration::from_millis(20));
        rack.toast("Could not submit. Please try again.", ToastKind::Error);

        let active = rack.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].kind, ToastKind::Error);

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(rack.active().is_empty());
    }

    #[tokio::test]
    async fn toasts_expire_independently() {
        let rack = ToastRack::with_ttl(Duration::from_millis(200));
        rack.toast("first", ToastKind::Error);
        tokio::time::sleep(Duration::from_millis(100)).await;
        rack.toast("second", ToastKind::Success);

        tokio::time::sleep(Duration::from_millis(150)).await;
        let active = rack.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "second");
    }

    #[test]
    fn manual_dismiss() {
        let rack = ToastRack::new();
        rack.toast("hello", ToastKind::Success);
        let id = rack.active()[0].id;
        assert!(rack.dismiss(id));
        assert!(!rack.dismiss(id));
        assert!(rack.active().is_empty());
    }
}
