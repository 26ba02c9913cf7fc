//! Fixed-window outbound rate limiting.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::MailerError;

/// Allows at most `limit` acquisitions per `window`.
///
/// Over-budget callers are rejected immediately instead of waiting.
#[derive(Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    state: Mutex<Window>,
}

#[derive(Debug)]
struct Window {
    started: Instant,
    used: u32,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit: limit.max(1),
            window,
            state: Mutex::new(Window {
                started: Instant::now(),
                used: 0,
            }),
        }
    }

    /// Take one slot from the current window.
    pub async fn try_acquire(&self) -> Result<(), MailerError> {
        let mut state = self.state.lock().await;
        let now = Instant::now();

        if now.duration_since(state.started) >= self.window {
            state.started = now;
            state.used = 0;
        }

        if state.used >= self.limit {
            return Err(MailerError::RateLimited {
                limit: self.limit,
                window: self.window,
            });
        }

        state.used += 1;
        Ok(())
    }
}
