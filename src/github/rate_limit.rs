use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Minimum spacing between any two calls.
pub const GENERAL_SPACING: Duration = Duration::from_secs(1);
/// Minimum spacing between two issue-creation calls. GitHub silently rejects
/// creations closer together than this without a normal rate-limit signal.
pub const CREATION_SPACING: Duration = Duration::from_secs(24);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    General,
    Creation,
}

#[derive(Debug, Default)]
struct Clock {
    last_call: Option<Instant>,
    last_creation: Option<Instant>,
}

/// Paces outbound calls. Both timestamps are call-start times and live
/// behind one lock, so the spacing holds even with concurrent callers.
#[derive(Debug)]
pub struct RateLimiter {
    general: Duration,
    creation: Duration,
    clock: Mutex<Clock>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(GENERAL_SPACING, CREATION_SPACING)
    }
}

impl RateLimiter {
    pub fn new(general: Duration, creation: Duration) -> Self {
        Self {
            general,
            creation,
            clock: Mutex::new(Clock::default()),
        }
    }

    /// Wait until a call of `kind` may start, then record it as started.
    /// The lock is held across the sleep so waiters are served one at a time.
    pub async fn acquire(&self, kind: CallKind) {
        let mut clock = self.clock.lock().await;

        let mut ready_at = clock.last_call.map(|t| t + self.general);
        if kind == CallKind::Creation {
            if let Some(t) = clock.last_creation {
                let creation_ready = t + self.creation;
                ready_at = Some(ready_at.map_or(creation_ready, |r| r.max(creation_ready)));
            }
        }

        if let Some(ready_at) = ready_at {
            let now = Instant::now();
            if ready_at > now {
                tracing::debug!("pacing {:?} call for {:?}", kind, ready_at - now);
                tokio::time::sleep_until(ready_at).await;
            }
        }

        let started = Instant::now();
        clock.last_call = Some(started);
        if kind == CallKind::Creation {
            clock.last_creation = Some(started);
        }
    }
}
