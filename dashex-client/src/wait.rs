//! Readiness polling.
//!
//! Provisioning tools often hand control back before the service accepts
//! connections, so a push first polls `GET /api/admin/stats` until it
//! answers. Only "nothing is listening" is retried; an HTTP error status
//! means the service is up and something else is wrong.

use std::time::{Duration, Instant};

use crate::api::GrafanaApi;
use crate::error::ApiError;

/// Delay between two probes.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Time source for the readiness loop.
pub trait Clock {
    /// Monotonic time since an arbitrary origin.
    fn now(&self) -> Duration;

    /// Block the calling thread for `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock [`Clock`] backed by [`Instant`] and [`std::thread::sleep`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Poll the service until it answers, or until `timeout` has elapsed.
///
/// `None` waits forever. The deadline is checked before every probe, and
/// every unreachable probe is followed by one [`POLL_INTERVAL`] sleep.
pub fn wait_until_ready<A, C>(
    api: &A,
    clock: &mut C,
    timeout: Option<Duration>,
) -> Result<(), ApiError>
where
    A: GrafanaApi + ?Sized,
    C: Clock + ?Sized,
{
    let started = clock.now();
    let mut attempts = 0u32;

    while timeout.map_or(true, |limit| clock.now().saturating_sub(started) < limit) {
        attempts += 1;
        tracing::info!("pinging Grafana at {} (attempt {attempts})", api.base_url());
        match api.ping() {
            Ok(()) => {
                tracing::info!("Grafana is ready");
                return Ok(());
            }
            Err(err) if err.is_unreachable() => {
                tracing::warn!(
                    error = %err,
                    "Grafana not ready, retrying in {}s",
                    POLL_INTERVAL.as_secs_f64()
                );
                clock.sleep(POLL_INTERVAL);
            }
            Err(err) => return Err(err),
        }
    }

    Err(ApiError::Unresponsive {
        url: api.base_url().to_string(),
        attempts,
    })
}
