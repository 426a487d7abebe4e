//! Polling loop that retries a check until it holds or the deadline passes.

use crate::asserters::Asserter;
use crate::errors::WaitError;
use driver_adapter::DriverError;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, warn};

/// Timeout and poll cadence for a single wait call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2_000);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

impl WaitOptions {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Book-keeping for one wait call. The deadline is fixed when the wait starts
/// so total wall-clock time stays bounded no matter how long individual
/// attempts take.
#[derive(Debug)]
struct PollState {
    deadline: Instant,
    poll_interval: Duration,
    attempts: u32,
}

impl PollState {
    fn new(opts: WaitOptions) -> Self {
        Self {
            deadline: Instant::now() + opts.timeout,
            poll_interval: opts.poll_interval,
            attempts: 0,
        }
    }

    fn deadline_passed(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

/// Repeatedly resolve a target and run `asserter` against it until the check
/// passes, fails fatally, or the deadline elapses.
///
/// The target is re-resolved on every attempt: the element matching a
/// selector can change identity between polls when the document re-renders,
/// so retrying against a stale handle would be wrong. Resolver failures are
/// driver failures and never retried.
///
/// The first attempt always runs, even with a zero timeout, because the
/// deadline is only checked after a failed attempt. A successful attempt
/// returns without sleeping. On success the wait yields the most recently
/// resolved target so callers can keep operating on the confirmed value.
/// There is no attempt cap and no backoff; the remote round-trip dominates
/// each attempt's cost, so a fixed interval keeps latency predictable.
pub async fn wait_for<T, F, Fut>(
    mut resolve_target: F,
    asserter: &dyn Asserter<T>,
    opts: WaitOptions,
) -> Result<T, WaitError>
where
    T: Send + Sync,
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = Result<T, DriverError>> + Send,
{
    let timeout = opts.timeout;
    let mut state = PollState::new(opts);

    loop {
        let target = resolve_target().await?;

        match asserter.assert(&target).await {
            Ok(()) => {
                debug!(attempts = state.attempts, "wait condition satisfied");
                return Ok(target);
            }
            Err(err) if err.is_retriable() => {
                if state.deadline_passed() {
                    warn!(
                        attempts = state.attempts,
                        timeout_ms = timeout.as_millis() as u64,
                        "wait deadline exhausted"
                    );
                    return Err(err.into_timeout(timeout));
                }
                state.attempts += 1;
                debug!(attempt = state.attempts, "condition not met yet, polling again");
                sleep(state.poll_interval).await;
            }
            Err(err) => return Err(err),
        }
    }
}
