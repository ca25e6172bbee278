//! Activation dispatch.
//!
//! The final synchronous stretch of a bootstrap run: walk the discovered
//! markers in document order, resolve each component identifier through
//! the export naming convention, and invoke the matching activation
//! routine with the marker. An identifier with no matching export is
//! logged and skipped - the page stays functional without that island.
//! After every marker has been processed, the page-level hydrate routine
//! runs exactly once.
//!
//! A routine that returns an error is not recovered: the run aborts at
//! that marker and the remaining markers (and page-level hydration) never
//! execute.

mod report;

pub use report::DispatchReport;

use thiserror::Error;

use crate::island::IslandMarker;
use crate::module::{InitializedModule, export_key};

// =============================================================================
// Errors
// =============================================================================

/// Activation routine failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActivationError {
    #[error("island `{component}` activation failed: {reason}")]
    Island { component: String, reason: String },

    #[error("page hydration failed: {0}")]
    Page(String),
}

impl ActivationError {
    pub fn island(component: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Island {
            component: component.into(),
            reason: reason.into(),
        }
    }

    pub fn page(reason: impl Into<String>) -> Self {
        Self::Page(reason.into())
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Activate every marker in discovery order, then finalize the page.
pub fn dispatch(
    markers: &[IslandMarker],
    module: &InitializedModule,
) -> Result<DispatchReport, ActivationError> {
    let mut report = DispatchReport::new(markers.len());

    for marker in markers {
        let key = export_key(&marker.component);
        match module.island(&key) {
            Some(routine) => {
                routine(marker)?;
                report.activated.push(marker.component.clone());
            }
            None => {
                crate::log!("hydrate"; "no island export for `{}`", marker.component);
                report.skipped.push(marker.component.clone());
            }
        }
    }

    module.hydrate()?;
    report.finalized = true;
    Ok(report)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoaderConfig;
    use crate::module::{Bundle, StaticHost, load_module};

    fn marker(component: &str, index: usize) -> IslandMarker {
        IslandMarker {
            component: component.to_string(),
            index,
            attrs: vec![("data-component".to_string(), component.to_string())],
        }
    }

    async fn init_module(bundle: Bundle) -> InitializedModule {
        let config = LoaderConfig::new("pkg", "client", "client_bg").unwrap();
        load_module(&StaticHost::new(bundle), &config).await.unwrap()
    }

    #[tokio::test]
    async fn test_skip_is_not_fatal() {
        let bundle = Bundle::builder()
            .init_ready()
            .island("known", |_| Ok(()))
            .hydrate(|| Ok(()))
            .build()
            .unwrap();
        let module = init_module(bundle).await;

        let markers = [marker("known", 0), marker("unknown", 1), marker("known", 2)];
        let report = dispatch(&markers, &module).unwrap();

        assert_eq!(report.activated, ["known", "known"]);
        assert_eq!(report.skipped, ["unknown"]);
        assert!(report.finalized);
    }

    #[tokio::test]
    async fn test_routine_error_aborts() {
        let bundle = Bundle::builder()
            .init_ready()
            .island("boom", |m| {
                Err(ActivationError::island(m.component.as_str(), "event binding failed"))
            })
            .island("after", |_| Ok(()))
            .hydrate(|| Ok(()))
            .build()
            .unwrap();
        let module = init_module(bundle).await;

        let markers = [marker("boom", 0), marker("after", 1)];
        let err = dispatch(&markers, &module).unwrap_err();
        assert!(matches!(err, ActivationError::Island { .. }));
    }

    #[tokio::test]
    async fn test_page_hydrate_error_propagates() {
        let bundle = Bundle::builder()
            .init_ready()
            .hydrate(|| Err(ActivationError::page("reactive runtime failed")))
            .build()
            .unwrap();
        let module = init_module(bundle).await;

        let err = dispatch(&[], &module).unwrap_err();
        assert_eq!(err, ActivationError::page("reactive runtime failed"));
    }
}
