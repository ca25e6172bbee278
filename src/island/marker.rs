//! Island marker descriptors.

use serde::Serialize;

/// One island placeholder scanned from the rendered document.
///
/// Markers are produced by the external rendering step and are read-only to
/// this crate. Multiple markers may share a component identifier - they are
/// independent instances, each activated on its own.
#[derive(Debug, Clone, Serialize)]
pub struct IslandMarker {
    /// Component identifier from the `data-component` attribute.
    pub component: String,

    /// Position among island markers in document order (depth-first,
    /// source order). Malformed markers consume an index too, so positions
    /// stay stable across filtering.
    pub index: usize,

    /// Full attribute set of the marker element, in source order.
    pub attrs: Vec<(String, String)>,
}

impl IslandMarker {
    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker() -> IslandMarker {
        IslandMarker {
            component: "counter".to_string(),
            index: 0,
            attrs: vec![
                ("data-component".to_string(), "counter".to_string()),
                ("data-start".to_string(), "5".to_string()),
            ],
        }
    }

    #[test]
    fn test_attr_lookup() {
        let m = marker();
        assert_eq!(m.attr("data-start"), Some("5"));
        assert_eq!(m.attr("data-missing"), None);
    }

    #[test]
    fn test_serializes_for_tooling() {
        let json = serde_json::to_string(&marker()).unwrap();
        assert!(json.contains(r#""component":"counter""#));
    }
}
