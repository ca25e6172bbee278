//! The bootstrap run sequence.
//!
//! One run per rendered page:
//!
//! ```text
//! Idle -> Loading -> Discovering -> Dispatching(i=0..N) -> Finalized
//! ```
//!
//! No transition re-enters an earlier state. Exactly two suspension points
//! exist: the idle wait and the chained module-load / payload-init wait.
//! Discovery and dispatch run synchronously once resumed, so markers are
//! processed strictly in document order with nothing interleaved between
//! individual activations.
//!
//! Failures in Loading or Dispatching are terminal for the run and surface
//! as [`BootstrapError`] - the single top-level error channel. Callers
//! choose what to do with one (log, retry with a fresh bundle, fall back
//! to the static page); the run itself never retries.


use std::sync::Arc;

use thiserror::Error;

use crate::config::LoaderConfig;
use crate::dispatch::{ActivationError, DispatchReport, dispatch};
use crate::island::{ScanError, scan};
use crate::module::{LoadError, ModuleHost, load_module};
use crate::schedule::{IdleHost, NoIdle, when_idle};

// =============================================================================
// Errors
// =============================================================================

/// Terminal failures of a bootstrap run.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("client bundle failed to load")]
    Load(#[from] LoadError),

    #[error("island discovery failed")]
    Scan(#[from] ScanError),

    #[error("activation aborted")]
    Activation(#[from] ActivationError),
}

// =============================================================================
// Bootstrap
// =============================================================================

/// One lazily-activated bootstrap pass over a rendered page.
pub struct Bootstrap {
    config: LoaderConfig,
    host: Arc<dyn ModuleHost>,
    idle: Arc<dyn IdleHost>,
}

impl Bootstrap {
    /// Create a bootstrap with the synchronous idle fallback ([`NoIdle`]):
    /// work begins immediately when `run` is awaited.
    pub fn new(config: LoaderConfig, host: Arc<dyn ModuleHost>) -> Self {
        Self {
            config,
            host,
            idle: Arc::new(NoIdle),
        }
    }

    /// Defer the run behind an idle host.
    pub fn with_idle(mut self, idle: Arc<dyn IdleHost>) -> Self {
        self.idle = idle;
        self
    }

    /// Run the bootstrap over a rendered document.
    ///
    /// Consumes the bootstrap: the loaded module is owned by exactly one
    /// run and discarded once the page-level hydrate returns.
    pub async fn run(self, html: &str) -> Result<DispatchReport, BootstrapError> {
        when_idle(self.idle.as_ref()).await;
        crate::debug!("bootstrap"; "idle granted, loading client bundle");

        let module = load_module(self.host.as_ref(), &self.config).await?;
        crate::debug!("bootstrap"; "bundle ready ({} island export(s))", module.island_count());

        let found = scan(html)?;
        crate::debug!("bootstrap"; "discovered {} island marker(s)", found.markers.len());

        let report = dispatch(&found.markers, &module)?;
        crate::debug!(
            "bootstrap";
            "finalized: {} activated, {} skipped",
            report.activated_count(),
            report.skipped_count()
        );
        Ok(report)
    }
}
