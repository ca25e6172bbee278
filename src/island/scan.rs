//! Document-order marker extraction.
//!
//! A synchronous, read-only pass over the rendered HTML. Markers come back
//! in document order (depth-first, source order) - the order a
//! `querySelectorAll` traversal would yield - so activation order matches
//! the order of appearance on the page. The scan never mutates the
//! document and is re-runnable, though the bootstrap invokes it exactly
//! once per run.

use thiserror::Error;

use crate::island::marker::IslandMarker;

/// Marker element tag emitted by the rendering step.
pub const ISLAND_TAG: &str = "tola-island";

/// Attribute carrying the component identifier.
pub const COMPONENT_ATTR: &str = "data-component";

// =============================================================================
// Errors
// =============================================================================

/// Discovery failures.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("document parse failed: {0}")]
    Parse(String),
}

// =============================================================================
// Scan
// =============================================================================

/// Result of one discovery pass.
#[derive(Debug, Default)]
pub struct Scan {
    /// Well-formed markers, in document order.
    pub markers: Vec<IslandMarker>,

    /// Document-order indices of markers with no usable component
    /// identifier. Excluded from dispatch; the rendering step is external
    /// input and is not trusted to be well-formed.
    pub malformed: Vec<usize>,
}

/// Scan a rendered document for island markers.
pub fn scan(html: &str) -> Result<Scan, ScanError> {
    let dom = tl::parse(html, tl::ParserOptions::default())
        .map_err(|e| ScanError::Parse(e.to_string()))?;
    let parser = dom.parser();

    let mut result = Scan::default();
    let mut next_index = 0usize;
    for handle in dom.children() {
        walk(*handle, parser, &mut result, &mut next_index);
    }
    Ok(result)
}

/// Depth-first walk collecting marker elements in source order.
fn walk(handle: tl::NodeHandle, parser: &tl::Parser, result: &mut Scan, next_index: &mut usize) {
    let Some(node) = handle.get(parser) else {
        return;
    };
    let tl::Node::Tag(tag) = node else {
        return;
    };

    if tag.name().as_utf8_str().eq_ignore_ascii_case(ISLAND_TAG) {
        collect(tag, result, next_index);
    }

    for child in tag.children().top().iter() {
        walk(*child, parser, result, next_index);
    }
}

/// Extract a marker descriptor from one island element.
fn collect(tag: &tl::HTMLTag, result: &mut Scan, next_index: &mut usize) {
    let index = *next_index;
    *next_index += 1;

    let mut component = String::new();
    let mut attrs = Vec::new();
    for (key, value) in tag.attributes().iter() {
        let value = value.map(|v| v.to_string()).unwrap_or_default();
        if key.as_ref() == COMPONENT_ATTR {
            component = value.clone();
        }
        attrs.push((key.to_string(), value));
    }

    if component.is_empty() {
        crate::log!("scan"; "island marker #{index} has no `{COMPONENT_ATTR}` identifier");
        result.malformed.push(index);
        return;
    }

    result.markers.push(IslandMarker {
        component,
        index,
        attrs,
    });
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let scan = scan("<html><body><p>static</p></body></html>").unwrap();
        assert!(scan.markers.is_empty());
        assert!(scan.malformed.is_empty());
    }

    #[test]
    fn test_document_order() {
        let html = r#"
            <body>
                <tola-island data-component="nav"></tola-island>
                <main>
                    <tola-island data-component="counter"></tola-island>
                </main>
                <tola-island data-component="footer"></tola-island>
            </body>
        "#;
        let scan = scan(html).unwrap();
        let ids: Vec<_> = scan.markers.iter().map(|m| m.component.as_str()).collect();
        assert_eq!(ids, ["nav", "counter", "footer"]);
        assert_eq!(
            scan.markers.iter().map(|m| m.index).collect::<Vec<_>>(),
            [0, 1, 2]
        );
    }

    #[test]
    fn test_duplicate_components_are_independent_instances() {
        let html = r#"
            <tola-island data-component="counter"></tola-island>
            <tola-island data-component="counter"></tola-island>
        "#;
        let scan = scan(html).unwrap();
        assert_eq!(scan.markers.len(), 2);
        assert_eq!(scan.markers[0].component, scan.markers[1].component);
        assert_ne!(scan.markers[0].index, scan.markers[1].index);
    }

    #[test]
    fn test_nested_markers_found_depth_first() {
        let html = r#"
            <tola-island data-component="outer">
                <tola-island data-component="inner"></tola-island>
            </tola-island>
        "#;
        let scan = scan(html).unwrap();
        let ids: Vec<_> = scan.markers.iter().map(|m| m.component.as_str()).collect();
        assert_eq!(ids, ["outer", "inner"]);
    }

    #[test]
    fn test_attributes_captured() {
        let html = r#"<tola-island data-component="counter" data-start="5"></tola-island>"#;
        let scan = scan(html).unwrap();
        assert_eq!(scan.markers[0].attr("data-start"), Some("5"));
    }

    #[test]
    fn test_missing_identifier_is_malformed() {
        let html = r#"
            <tola-island></tola-island>
            <tola-island data-component="ok"></tola-island>
            <tola-island data-component=""></tola-island>
        "#;
        let scan = scan(html).unwrap();
        assert_eq!(scan.markers.len(), 1);
        assert_eq!(scan.markers[0].component, "ok");
        assert_eq!(scan.markers[0].index, 1);
        assert_eq!(scan.malformed, [0, 2]);
    }

    #[test]
    fn test_unrelated_custom_elements_ignored() {
        let html = r#"<other-widget data-component="counter"></other-widget>"#;
        let scan = scan(html).unwrap();
        assert!(scan.markers.is_empty());
    }
}
