//! Dispatch run summaries.
//!
//! A [`DispatchReport`] is the value a successful bootstrap run resolves
//! to: which islands were activated, which were skipped, and whether the
//! page-level hydrate ran. Serializable so dev tooling can surface it.

use serde::{Deserialize, Serialize};

/// Summary of one dispatch pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    /// Markers handed to the dispatcher.
    pub total: usize,

    /// Components activated, in document order (duplicates preserved).
    pub activated: Vec<String>,

    /// Components skipped for want of a matching export, in document order.
    pub skipped: Vec<String>,

    /// Whether the page-level hydrate routine ran.
    pub finalized: bool,
}

impl DispatchReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn activated_count(&self) -> usize {
        self.activated.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Parse from JSON string
    pub fn from_json(s: &str) -> Option<Self> {
        serde_json::from_str(s).ok()
    }
}
