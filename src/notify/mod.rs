//! Notification and accessibility capabilities.
//!
//! The form session only talks to these traits, so it can run against a
//! terminal, a test recorder, or a real page bridge alike.

pub mod analytics;
pub mod live_region;
pub mod toast;

pub use analytics::{AnalyticsEvent, DataLayer};
pub use live_region::LiveRegion;
pub use toast::{Toast, ToastKind, ToastRack};

/// Capability: emit a named analytics event with a payload.
pub trait AnalyticsSink: Send + Sync {
    fn push(&self, event: AnalyticsEvent);
}

/// Capability: announce a status message to assistive technology.
///
/// Implementations clear the message on their own shortly afterwards.
pub trait Announcer: Send + Sync {
    fn announce(&self, message: &str);
}

/// Capability: show a transient toast notification.
pub trait Notifier: Send + Sync {
    fn toast(&self, message: &str, kind: ToastKind);
}
