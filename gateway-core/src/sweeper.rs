//! Background job: periodic removal of expired sessions.
//!
//! Expired records are also dropped lazily on lookup; the sweeper catches
//! the ones nobody asks about again.

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::registry::SessionRegistry;

/// Handle to the background sweep task.
///
/// The task is tied to this handle: `shutdown()` (or dropping the handle)
/// stops it, so tests and graceful shutdown terminate cleanly.
pub struct Sweeper {
    handle: JoinHandle<()>,
}

impl Sweeper {
    /// Spawns the sweep task on the given interval.
    pub fn spawn(registry: SessionRegistry, interval: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; skip it so sweeps start
            // one full interval after startup.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = registry.sweep();
                if removed > 0 {
                    tracing::info!(removed, "swept expired sessions");
                }
            }
        });

        Self { handle }
    }

    /// Stops the sweep task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::registry::tests::ManualClock;

    #[tokio::test]
    async fn test_sweeper_removes_expired_sessions() {
        let clock = ManualClock::starting_at(Utc::now());
        let registry =
            SessionRegistry::with_clock(chrono::Duration::hours(24), clock.clone());
        registry.create("up123", "10034");

        let sweeper = Sweeper::spawn(registry.clone(), Duration::from_millis(10));
        clock.advance(chrono::Duration::hours(25));

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(registry.len(), 0);
        sweeper.shutdown();
    }

    #[tokio::test]
    async fn test_sweeper_leaves_live_sessions() {
        let registry = SessionRegistry::with_clock(
            chrono::Duration::hours(24),
            Arc::new(crate::registry::SystemClock),
        );
        registry.create("up123", "10034");

        let sweeper = Sweeper::spawn(registry.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(registry.len(), 1);
        sweeper.shutdown();
    }
}
