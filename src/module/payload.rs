//! Binary payload validation.
//!
//! The payload's internal format is opaque to this crate; only the leading
//! header is checked so a truncated or mislabeled artifact fails at load
//! time instead of during initialization.

use std::io::Read;
use std::path::Path;

use thiserror::Error;

/// Leading magic of every WebAssembly binary: `\0asm`.
pub const WASM_MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6d];

/// Binary format version 1, little-endian.
pub const WASM_VERSION: [u8; 4] = [0x01, 0x00, 0x00, 0x00];

// =============================================================================
// Errors
// =============================================================================

/// Binary payload failures surfaced during loading.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload `{0}` not found")]
    NotFound(String),

    #[error("payload `{path}` could not be read")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("payload `{path}` is malformed: {reason}")]
    Malformed { path: String, reason: String },

    #[error("payload initialization failed: {0}")]
    Init(String),
}

impl PayloadError {
    /// Initializer failure with an opaque reason.
    pub fn init(reason: impl Into<String>) -> Self {
        Self::Init(reason.into())
    }
}

// =============================================================================
// Header Validation
// =============================================================================

/// Validate the payload header bytes (magic + version).
pub fn validate_header(request_path: &str, bytes: &[u8]) -> Result<(), PayloadError> {
    if bytes.len() < 8 {
        return Err(PayloadError::Malformed {
            path: request_path.to_string(),
            reason: "truncated header".to_string(),
        });
    }
    if bytes[0..4] != WASM_MAGIC {
        return Err(PayloadError::Malformed {
            path: request_path.to_string(),
            reason: "missing \\0asm magic".to_string(),
        });
    }
    if bytes[4..8] != WASM_VERSION {
        return Err(PayloadError::Malformed {
            path: request_path.to_string(),
            reason: format!("unsupported binary version {:?}", &bytes[4..8]),
        });
    }
    Ok(())
}

/// Validate the header of an on-disk payload artifact.
///
/// `request_path` is the request-facing path used in diagnostics; `file` is
/// the resolved filesystem location.
pub fn validate_payload_file(request_path: &str, file: &Path) -> Result<(), PayloadError> {
    let mut handle = std::fs::File::open(file).map_err(|source| PayloadError::Unreadable {
        path: request_path.to_string(),
        source,
    })?;

    let mut header = [0u8; 8];
    match handle.read_exact(&mut header) {
        Ok(()) => validate_header(request_path, &header),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Err(PayloadError::Malformed {
            path: request_path.to_string(),
            reason: "truncated header".to_string(),
        }),
        Err(source) => Err(PayloadError::Unreadable {
            path: request_path.to_string(),
            source,
        }),
    }
}

// =============================================================================
// Tests
// =============================================================================
