//! Module resolution hosts.
//!
//! A [`ModuleHost`] resolves the two request paths of a bootstrap run to a
//! client [`Bundle`]. The compiled bundle itself is produced by an external
//! build step; hosts decide how much of the surrounding reality to verify:
//!
//! - [`StaticHost`] hands out a pre-registered bundle as-is.
//! - [`DirHost`] additionally resolves both request paths against a site
//!   output directory - percent decoding, query stripping, traversal
//!   rejection - and validates the artifacts before handing the bundle out.
//!
//! A bundle is owned by exactly one bootstrap run, so each host serves its
//! bundle at most once.

use std::borrow::Cow;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use parking_lot::Mutex;
use percent_encoding::percent_decode_str;

use crate::config::RequestPaths;
use crate::module::bundle::Bundle;
use crate::module::load::LoadError;
use crate::module::payload::{self, PayloadError};

/// A pending bundle resolution.
pub type HostResolve<'a> = Pin<Box<dyn Future<Output = Result<Bundle, LoadError>> + Send + 'a>>;

// =============================================================================
// ModuleHost
// =============================================================================

/// Resolves request paths to a client bundle.
pub trait ModuleHost: Send + Sync {
    /// Resolve the module request path to a bundle.
    ///
    /// This is the first suspension point of a bootstrap run. Failures are
    /// not recovered here; they propagate to the top-level caller.
    fn resolve<'a>(&'a self, paths: &'a RequestPaths) -> HostResolve<'a>;
}

// =============================================================================
// StaticHost
// =============================================================================

/// Serves a pre-registered bundle: the embedder's stand-in for the compiled
/// client bundle.
pub struct StaticHost {
    bundle: Mutex<Option<Bundle>>,
}

impl StaticHost {
    pub fn new(bundle: Bundle) -> Self {
        Self {
            bundle: Mutex::new(Some(bundle)),
        }
    }
}

impl ModuleHost for StaticHost {
    fn resolve<'a>(&'a self, paths: &'a RequestPaths) -> HostResolve<'a> {
        Box::pin(async move {
            self.bundle
                .lock()
                .take()
                .ok_or_else(|| LoadError::module(paths.module.as_str(), "bundle already consumed"))
        })
    }
}

// =============================================================================
// DirHost
// =============================================================================

/// Serves a bundle after verifying its artifacts under a site output
/// directory.
pub struct DirHost {
    root: PathBuf,
    bundle: Mutex<Option<Bundle>>,
}

impl DirHost {
    pub fn new(root: impl Into<PathBuf>, bundle: Bundle) -> Self {
        Self {
            root: root.into(),
            bundle: Mutex::new(Some(bundle)),
        }
    }

    fn verify(&self, paths: &RequestPaths) -> Result<(), LoadError> {
        let module_file = resolve_artifact(&self.root, &paths.module)
            .ok_or_else(|| LoadError::module(paths.module.as_str(), "not found under site root"))?;

        let len = std::fs::metadata(&module_file)
            .map_err(|e| LoadError::module(paths.module.as_str(), e.to_string()))?
            .len();
        if len == 0 {
            return Err(LoadError::module(paths.module.as_str(), "empty module artifact"));
        }

        let payload_file = resolve_artifact(&self.root, &paths.payload)
            .ok_or_else(|| PayloadError::NotFound(paths.payload.clone()))?;
        payload::validate_payload_file(&paths.payload, &payload_file)?;

        Ok(())
    }
}

impl ModuleHost for DirHost {
    fn resolve<'a>(&'a self, paths: &'a RequestPaths) -> HostResolve<'a> {
        Box::pin(async move {
            self.verify(paths)?;
            self.bundle
                .lock()
                .take()
                .ok_or_else(|| LoadError::module(paths.module.as_str(), "bundle already consumed"))
        })
    }
}

// =============================================================================
// Path Resolution
// =============================================================================

/// Resolve a request path to a file under `root`.
fn resolve_artifact(root: &Path, request: &str) -> Option<PathBuf> {
    let clean = normalize_request(request);

    // Reject paths with suspicious patterns early
    if clean.contains("..") {
        return None;
    }

    let local = root.join(&clean);

    // Canonicalize to resolve symlinks and verify path is under root
    let canonical = local.canonicalize().ok()?;
    let root_canonical = root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    canonical.is_file().then_some(canonical)
}

/// Normalize a request path: decode, strip query string, trim slashes.
fn normalize_request(request: &str) -> String {
    let decoded = percent_decode_str(request)
        .decode_utf8()
        .map(Cow::into_owned)
        .unwrap_or_default();

    let path = decoded.split('?').next().unwrap_or(&decoded);
    path.trim_matches('/').to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_request() {
        assert_eq!(normalize_request("/pkg/client.js"), "pkg/client.js");
        assert_eq!(normalize_request("/pkg/client.js?v=2"), "pkg/client.js");
        assert_eq!(normalize_request("/pkg/a%20b.js"), "pkg/a b.js");
    }

    #[test]
    fn test_resolve_artifact_finds_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("pkg")).unwrap();
        std::fs::write(dir.path().join("pkg/client.js"), "export default init;").unwrap();

        let found = resolve_artifact(dir.path(), "/pkg/client.js");
        assert!(found.is_some());
    }

    #[test]
    fn test_resolve_artifact_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("secret.txt"), "x").unwrap();
        let root = dir.path().join("public");
        std::fs::create_dir_all(&root).unwrap();

        assert!(resolve_artifact(&root, "/../secret.txt").is_none());
    }

    #[test]
    fn test_resolve_artifact_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve_artifact(dir.path(), "/pkg/missing.js").is_none());
    }
}
