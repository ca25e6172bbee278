//! The two-step load sequence.
//!
//! `load_module` is the bootstrap's Loading phase: resolve the module
//! request path through the host (first suspension point), then invoke the
//! bundle's default initializer with the binary payload request path
//! (second suspension point). Only after the initializer signals completion
//! does an [`InitializedModule`] exist - no island activation routine can
//! run before then.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::config::LoaderConfig;
use crate::dispatch::ActivationError;
use crate::module::bundle::{Bundle, BundleError, HydrateFn, IslandFn};
use crate::module::host::ModuleHost;
use crate::module::payload::PayloadError;

// =============================================================================
// Errors
// =============================================================================

/// Load failures: module or payload cannot be resolved, validated, or
/// initialized. Never recovered locally (no retry, no fallback) - the run
/// aborts before discovery.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("module request `{path}` failed: {reason}")]
    Module { path: String, reason: String },

    #[error("bundle shape invalid: {0}")]
    Shape(#[from] BundleError),

    #[error(transparent)]
    Payload(#[from] PayloadError),
}

impl LoadError {
    pub fn module(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Module {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// InitializedModule
// =============================================================================

/// A loaded client bundle whose payload initializer has completed.
pub struct InitializedModule {
    islands: FxHashMap<String, IslandFn>,
    hydrate: HydrateFn,
}

impl std::fmt::Debug for InitializedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitializedModule")
            .field("island_count", &self.islands.len())
            .finish_non_exhaustive()
    }
}

impl InitializedModule {
    /// Look up an island activation routine by its export key.
    pub fn island(&self, key: &str) -> Option<&IslandFn> {
        self.islands.get(key)
    }

    /// Number of island exports in the registry.
    pub fn island_count(&self) -> usize {
        self.islands.len()
    }

    /// Invoke the page-level hydrate routine.
    pub fn hydrate(&self) -> Result<(), ActivationError> {
        (self.hydrate)()
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Load the client bundle and initialize its binary payload.
pub async fn load_module(
    host: &dyn ModuleHost,
    config: &LoaderConfig,
) -> Result<InitializedModule, LoadError> {
    let paths = config.request_paths();

    crate::debug!("load"; "requesting module `{}`", paths.module);
    let bundle = host.resolve(&paths).await?;

    crate::debug!("load"; "initializing payload `{}`", paths.payload);
    (bundle.init)(&paths.payload).await?;

    let Bundle {
        init: _,
        islands,
        hydrate,
    } = bundle;
    Ok(InitializedModule { islands, hydrate })
}

// =============================================================================
// Tests
// =============================================================================
