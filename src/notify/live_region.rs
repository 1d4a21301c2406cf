//! Screen-reader live region — holds one status message, cleared after a delay.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;

use super::Announcer;

/// How long an announcement stays in the region.
pub const DEFAULT_CLEAR_AFTER: Duration = Duration::from_secs(1);

#[derive(Debug, Default)]
struct RegionText {
    /// Bumped on every announcement so a stale timer never clears a newer one.
    generation: u64,
    text: String,
}

/// A polite live region. Each announcement replaces the previous one.
#[derive(Debug, Clone)]
pub struct LiveRegion {
    inner: Arc<Mutex<RegionText>>,
    clear_after: Duration,
}

impl LiveRegion {
    pub fn new() -> Self {
        Self::with_clear_after(DEFAULT_CLEAR_AFTER)
    }

    pub fn with_clear_after(clear_after: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RegionText::default())),
            clear_after,
        }
    }

    /// Current region text; empty once the announcement has been cleared.
    pub fn text(&self) -> String {
        self.inner
            .lock()
            .map(|region| region.text.clone())
            .unwrap_or_default()
    }
}

impl Default for LiveRegion {
    fn default() -> Self {
        Self::new()
    }
}

impl Announcer for LiveRegion {
    fn announce(&self, message: &str) {
        let generation = {
            let Ok(mut region) = self.inner.lock() else {
                return;
            };
            region.generation += 1;
            region.text = message.to_string();
            region.generation
        };
        debug!(text = message, "Live region announcement");

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            // No runtime to run the timer on; the text stays until replaced.
            return;
        };
        let inner = Arc::clone(&self.inner);
        let clear_after = self.clear_after;
        handle.spawn(async move {
            tokio::time::sleep(clear_after).await;
            if let Ok(mut region) = inner.lock() {
                if region.generation == generation {
                    region.text.clear();
                }
            }
        });
    }
}
