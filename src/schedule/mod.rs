//! Idle scheduling.
//!
//! The bootstrap defers all downstream work until the host grants an idle
//! period. [`IdleHost`] is the capability seam: hosts that can observe
//! contention resolve the wait when a quiet window opens; hosts without the
//! capability use [`NoIdle`], which resolves immediately (the synchronous
//! fallback). In async code the continuation after the await plays the role
//! of the scheduled callback.
//!
//! There is no execution-time bound and no timeout: an idle host that never
//! grants a period stalls the run indefinitely. The fallback path avoids
//! this by construction.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// A pending idle grant.
pub type IdleWait<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

// =============================================================================
// IdleHost
// =============================================================================

/// Host capability for detecting an idle period.
pub trait IdleHost: Send + Sync {
    /// Resolve when the host grants an idle period.
    fn wait_idle(&self) -> IdleWait<'_>;
}

/// Suspend until `host` grants an idle period.
pub async fn when_idle(host: &dyn IdleHost) {
    host.wait_idle().await;
}

// =============================================================================
// NoIdle
// =============================================================================

/// The synchronous fallback: no idle capability, work begins immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIdle;

impl IdleHost for NoIdle {
    fn wait_idle(&self) -> IdleWait<'_> {
        Box::pin(std::future::ready(()))
    }
}

// =============================================================================
// DeadlineIdle
// =============================================================================

/// Deferred idle host backed by the tokio runtime.
///
/// Yields to the scheduler, then resolves after a quiet delay. This is the
/// crate's stand-in for a browser idle period in server-side and test
/// environments; embedders with a real contention signal implement
/// [`IdleHost`] themselves.
#[derive(Debug, Clone, Copy)]
pub struct DeadlineIdle {
    quiet: Duration,
}

impl DeadlineIdle {
    pub const DEFAULT_QUIET: Duration = Duration::from_millis(50);

    pub fn new(quiet: Duration) -> Self {
        Self { quiet }
    }
}

impl Default for DeadlineIdle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_QUIET)
    }
}

impl IdleHost for DeadlineIdle {
    fn wait_idle(&self) -> IdleWait<'_> {
        let quiet = self.quiet;
        Box::pin(async move {
            tokio::task::yield_now().await;
            tokio::time::sleep(quiet).await;
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
