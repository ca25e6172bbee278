//! The client bundle capability set.
//!
//! A [`Bundle`] is what module loading resolves to: a default initializer
//! that readies the binary payload, a registry of island activation
//! routines keyed by the fixed export naming convention, and a page-level
//! hydrate routine. The shape is validated once, at the load boundary, by
//! [`BundleBuilder::build`] - a bundle missing its initializer or hydrate
//! export is refused instead of failing deep inside a run.

use std::future::Future;
use std::pin::Pin;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::dispatch::ActivationError;
use crate::island::IslandMarker;
use crate::module::payload::PayloadError;

// =============================================================================
// Export Naming Convention
// =============================================================================

/// Prefix concatenated with a component identifier to form an export key.
pub const ISLAND_EXPORT_PREFIX: &str = "_island_";

/// Build the registry key for a component identifier.
///
/// # Example
/// ```ignore
/// assert_eq!(export_key("counter"), "_island_counter");
/// ```
#[inline]
pub fn export_key(component: &str) -> String {
    format!("{ISLAND_EXPORT_PREFIX}{component}")
}

// =============================================================================
// Capability Types
// =============================================================================

/// Completion signal of the default initializer.
pub type InitFuture = Pin<Box<dyn Future<Output = Result<(), PayloadError>> + Send>>;

/// The default initializer: takes the binary payload request path.
pub type InitFn = Box<dyn Fn(&str) -> InitFuture + Send + Sync>;

/// One island activation routine: binds behavior to a specific marker.
pub type IslandFn = Box<dyn Fn(&IslandMarker) -> Result<(), ActivationError> + Send + Sync>;

/// The page-level hydrate routine.
pub type HydrateFn = Box<dyn Fn() -> Result<(), ActivationError> + Send + Sync>;

// =============================================================================
// Errors
// =============================================================================

/// Shape violations caught at the load boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BundleError {
    #[error("bundle has no default initializer")]
    MissingInit,

    #[error("bundle has no page-level hydrate export")]
    MissingHydrate,
}

// =============================================================================
// Bundle
// =============================================================================

/// The validated capability set of a loaded client bundle.
///
/// Owned exclusively by one bootstrap run and discarded after the
/// page-level hydrate routine returns.
pub struct Bundle {
    pub(crate) init: InitFn,
    pub(crate) islands: FxHashMap<String, IslandFn>,
    pub(crate) hydrate: HydrateFn,
}

impl Bundle {
    pub fn builder() -> BundleBuilder {
        BundleBuilder::default()
    }

    /// Number of island exports in the registry.
    pub fn island_count(&self) -> usize {
        self.islands.len()
    }
}

impl std::fmt::Debug for Bundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bundle")
            .field("islands", &self.islands.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// BundleBuilder
// =============================================================================

/// Builds a [`Bundle`], enforcing its shape at `build` time.
#[derive(Default)]
pub struct BundleBuilder {
    init: Option<InitFn>,
    islands: FxHashMap<String, IslandFn>,
    hydrate: Option<HydrateFn>,
}

impl BundleBuilder {
    /// Set the default initializer.
    pub fn init<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> InitFuture + Send + Sync + 'static,
    {
        self.init = Some(Box::new(f));
        self
    }

    /// Set an initializer that completes immediately.
    ///
    /// For bundles whose payload needs no staged initialization.
    pub fn init_ready(self) -> Self {
        self.init(|_| Box::pin(std::future::ready(Ok(()))))
    }

    /// Register an island activation routine under the export naming
    /// convention. Registering the same component twice replaces the
    /// earlier routine.
    pub fn island<F>(mut self, component: impl Into<String>, f: F) -> Self
    where
        F: Fn(&IslandMarker) -> Result<(), ActivationError> + Send + Sync + 'static,
    {
        self.islands.insert(export_key(&component.into()), Box::new(f));
        self
    }

    /// Set the page-level hydrate routine.
    pub fn hydrate<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Result<(), ActivationError> + Send + Sync + 'static,
    {
        self.hydrate = Some(Box::new(f));
        self
    }

    /// Validate the bundle shape and produce the capability set.
    pub fn build(self) -> Result<Bundle, BundleError> {
        let init = self.init.ok_or(BundleError::MissingInit)?;
        let hydrate = self.hydrate.ok_or(BundleError::MissingHydrate)?;
        Ok(Bundle {
            init,
            islands: self.islands,
            hydrate,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_key_convention() {
        assert_eq!(export_key("counter"), "_island_counter");
        assert_eq!(export_key(""), "_island_");
    }

    #[test]
    fn test_build_requires_init() {
        let err = Bundle::builder().hydrate(|| Ok(())).build().unwrap_err();
        assert_eq!(err, BundleError::MissingInit);
    }

    #[test]
    fn test_build_requires_hydrate() {
        let err = Bundle::builder().init_ready().build().unwrap_err();
        assert_eq!(err, BundleError::MissingHydrate);
    }

    #[test]
    fn test_islands_keyed_by_convention() {
        let bundle = Bundle::builder()
            .init_ready()
            .island("counter", |_| Ok(()))
            .island("nav", |_| Ok(()))
            .hydrate(|| Ok(()))
            .build()
            .unwrap();
        assert_eq!(bundle.island_count(), 2);
        assert!(bundle.islands.contains_key("_island_counter"));
        assert!(bundle.islands.contains_key("_island_nav"));
    }

    #[test]
    fn test_duplicate_island_replaces() {
        let bundle = Bundle::builder()
            .init_ready()
            .island("counter", |_| Ok(()))
            .island("counter", |_| Ok(()))
            .hydrate(|| Ok(()))
            .build()
            .unwrap();
        assert_eq!(bundle.island_count(), 1);
    }
}
