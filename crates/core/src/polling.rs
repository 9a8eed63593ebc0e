//! Bounded polling for asynchronous state.
//!
//! Clients that drive the studio (acceptance tests, scripted uploads) often
//! need to wait for something to settle: the server to accept connections,
//! an upload to appear on a component. [`wait_for`] re-checks a predicate at
//! a fixed interval and fails loudly with a description once the timeout is
//! spent.

use std::future::Future;
use std::time::{Duration, Instant};

/// Default upper bound on a single wait.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(200);

/// Default pause between checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Timeout and interval for a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_WAIT_TIMEOUT,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl WaitOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// A wait gave up before its condition held.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Timed out after {elapsed:?} ({attempts} checks) waiting for: {description}")]
pub struct WaitTimeout {
    pub description: String,
    pub elapsed: Duration,
    pub attempts: u32,
}

/// Poll `check` until it yields `Some`, returning the value.
///
/// The check always runs at least once, even with a zero timeout.
pub async fn wait_for_value<T, F, Fut>(
    description: &str,
    options: WaitOptions,
    mut check: F,
) -> Result<T, WaitTimeout>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let started = Instant::now();
    let mut attempts = 0_u32;

    loop {
        attempts += 1;
        if let Some(value) = check().await {
            return Ok(value);
        }

        let elapsed = started.elapsed();
        if elapsed >= options.timeout {
            return Err(WaitTimeout {
                description: description.to_string(),
                elapsed,
                attempts,
            });
        }

        let remaining = options.timeout - elapsed;
        tokio::time::sleep(options.interval.min(remaining)).await;
    }
}

/// Poll `check` until it returns `true`.
pub async fn wait_for<F, Fut>(
    description: &str,
    options: WaitOptions,
    mut check: F,
) -> Result<(), WaitTimeout>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    wait_for_value(description, options, || {
        let fut = check();
        async move { fut.await.then_some(()) }
    })
    .await
}
