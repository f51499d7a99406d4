use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Controllable time for the working-directory commit.
///
/// Passed to `HistoryStore` via `with_time_provider()` so scenarios can
/// check the timestamp of the synthetic row.
#[derive(Clone)]
pub struct MockClock {
    current: Arc<AtomicI64>,
}

impl MockClock {
    /// Start at a fixed timestamp.
    pub fn starting_at(now: i64) -> Self {
        Self {
            current: Arc::new(AtomicI64::new(now)),
        }
    }

    /// Creates a time provider function suitable for passing to HistoryStore.
    pub fn as_provider(&self) -> impl Fn() -> i64 + Send + Sync + 'static {
        let current = self.current.clone();
        move || current.load(Ordering::SeqCst)
    }

    /// Get current timestamp
    pub fn now(&self) -> i64 {
        self.current.load(Ordering::SeqCst)
    }

    /// Advance time by duration
    pub fn advance(&self, duration: Duration) {
        self.current
            .fetch_add(duration.as_secs() as i64, Ordering::SeqCst);
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::starting_at(1_700_000_000)
    }
}
