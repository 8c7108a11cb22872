use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::store::StoreError;

// ============================================================================
// Startup Connection Backoff
// ============================================================================
//
// Only the initial backend connection is retried. Request-path store calls
// fail fast and surface as 500s.
//
// ============================================================================

#[derive(Clone, Debug)]
pub struct BackoffPolicy {
    /// Connection attempts, including the first
    pub attempts: u32,
    pub first_delay: Duration,
    pub delay_cap: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            first_delay: Duration::from_millis(200),
            delay_cap: Duration::from_secs(5),
        }
    }
}

impl BackoffPolicy {
    /// Pause after failed attempt `attempt` (1-based): doubles each time, capped.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        self.first_delay
            .checked_mul(factor)
            .map_or(self.delay_cap, |delay| delay.min(self.delay_cap))
    }
}

/// Run `connect` until it succeeds or the policy's attempts are spent.
/// The last store error is returned on exhaustion.
pub async fn connect_with_backoff<F, Fut, T>(
    policy: &BackoffPolicy,
    target: &str,
    mut connect: F,
) -> Result<T, StoreError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, StoreError>>,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;

    loop {
        match connect(attempt).await {
            Ok(connection) => {
                if attempt > 1 {
                    tracing::info!(target_addr = %target, attempt, "Connected after retry");
                }
                return Ok(connection);
            }
            Err(e) if attempt >= attempts => {
                tracing::error!(
                    target_addr = %target,
                    attempts,
                    error = %e,
                    "Giving up on backend connection"
                );
                return Err(e);
            }
            Err(e) => {
                let delay = policy.delay_after(attempt);
                tracing::warn!(
                    target_addr = %target,
                    attempt,
                    error = %e,
                    delay_ms = delay.as_millis() as u64,
                    "Backend unreachable, retrying"
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
