//! Loader configuration.
//!
//! A [`LoaderConfig`] holds the three path fragments supplied at bootstrap
//! invocation: the package path, the module output name, and the binary
//! payload output name. It is immutable for the lifetime of one bootstrap
//! run and exists only to build the two request paths:
//!
//! ```text
//! /{package_path}/{module_name}.js
//! /{package_path}/{wasm_name}.wasm
//! ```
//!
//! Fragments are normalized (surrounding slashes trimmed) and validated at
//! construction so malformed input surfaces before any loading starts.

use thiserror::Error;

// =============================================================================
// Errors
// =============================================================================

/// Configuration-related errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("`{0}` must not be empty")]
    Empty(&'static str),

    #[error("`{field}` contains an invalid fragment: `{value}`")]
    InvalidFragment { field: &'static str, value: String },
}

// =============================================================================
// LoaderConfig
// =============================================================================

/// The three path fragments that configure one bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    package_path: String,
    module_name: String,
    wasm_name: String,
}

impl LoaderConfig {
    /// Create a validated loader configuration.
    ///
    /// The package path may contain `/` separators (e.g. `assets/pkg`); the
    /// output names may not. `..` segments are rejected everywhere.
    pub fn new(
        package_path: impl Into<String>,
        module_name: impl Into<String>,
        wasm_name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let package_path = normalize_fragment(&package_path.into());
        let module_name = normalize_fragment(&module_name.into());
        let wasm_name = normalize_fragment(&wasm_name.into());

        validate_path("package_path", &package_path)?;
        validate_name("module_name", &module_name)?;
        validate_name("wasm_name", &wasm_name)?;

        Ok(Self {
            package_path,
            module_name,
            wasm_name,
        })
    }

    pub fn package_path(&self) -> &str {
        &self.package_path
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn wasm_name(&self) -> &str {
        &self.wasm_name
    }

    /// Build the two request paths this configuration resolves to.
    pub fn request_paths(&self) -> RequestPaths {
        RequestPaths {
            module: format!("/{}/{}.js", self.package_path, self.module_name),
            payload: format!("/{}/{}.wasm", self.package_path, self.wasm_name),
        }
    }
}

// =============================================================================
// RequestPaths
// =============================================================================

/// The two fetch targets of one bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPaths {
    /// `/{package_path}/{module_name}.js`
    pub module: String,
    /// `/{package_path}/{wasm_name}.wasm`
    pub payload: String,
}

// =============================================================================
// Validation
// =============================================================================

/// Trim surrounding slashes so fragments compose into clean request paths.
fn normalize_fragment(fragment: &str) -> String {
    fragment.trim_matches('/').to_string()
}

/// Validate a multi-segment path fragment (package path).
fn validate_path(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Empty(field));
    }
    if value.split('/').any(|seg| seg.is_empty() || seg == "..") {
        return Err(ConfigError::InvalidFragment {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Validate a single-segment output name.
fn validate_name(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Empty(field));
    }
    if value.contains('/') || value == ".." {
        return Err(ConfigError::InvalidFragment {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_exact_request_paths() {
        let config = LoaderConfig::new("p", "m", "w").unwrap();
        let paths = config.request_paths();
        assert_eq!(paths.module, "/p/m.js");
        assert_eq!(paths.payload, "/p/w.wasm");
    }

    #[test]
    fn test_multi_segment_package_path() {
        let config = LoaderConfig::new("assets/pkg", "client", "client_bg").unwrap();
        let paths = config.request_paths();
        assert_eq!(paths.module, "/assets/pkg/client.js");
        assert_eq!(paths.payload, "/assets/pkg/client_bg.wasm");
    }

    #[test]
    fn test_surrounding_slashes_trimmed() {
        let config = LoaderConfig::new("/pkg/", "client", "client_bg").unwrap();
        assert_eq!(config.package_path(), "pkg");
        assert_eq!(config.request_paths().module, "/pkg/client.js");
    }

    #[test]
    fn test_empty_fragment_rejected() {
        assert_eq!(
            LoaderConfig::new("", "m", "w"),
            Err(ConfigError::Empty("package_path"))
        );
        assert_eq!(
            LoaderConfig::new("p", "", "w"),
            Err(ConfigError::Empty("module_name"))
        );
        assert_eq!(
            LoaderConfig::new("p", "m", "/"),
            Err(ConfigError::Empty("wasm_name"))
        );
    }

    #[test]
    fn test_traversal_rejected() {
        assert!(LoaderConfig::new("pkg/../secret", "m", "w").is_err());
        assert!(LoaderConfig::new("p", "..", "w").is_err());
        assert!(LoaderConfig::new("p", "m", "..").is_err());
    }

    #[test]
    fn test_slash_in_output_name_rejected() {
        assert!(LoaderConfig::new("p", "dir/m", "w").is_err());
        assert!(LoaderConfig::new("p", "m", "dir/w").is_err());
    }

    #[test]
    fn test_empty_inner_segment_rejected() {
        assert!(LoaderConfig::new("a//b", "m", "w").is_err());
    }
}
