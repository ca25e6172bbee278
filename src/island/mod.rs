//! Island discovery.
//!
//! The rendering step emits `<tola-island data-component="...">` markers
//! for every region that needs client-side behavior. Discovery parses the
//! rendered document and produces an ordered sequence of marker
//! descriptors, decoupled from any live document - dispatch consumes the
//! descriptors, never the DOM.
//!
//! # Module Structure
//!
//! - `marker` - the [`IslandMarker`] descriptor
//! - `scan` - document-order marker extraction

mod marker;
mod scan;

pub use marker::IslandMarker;
pub use scan::{COMPONENT_ATTR, ISLAND_TAG, Scan, ScanError, scan};
