//! Client bundle loading.
//!
//! The compiled client bundle is an external collaborator: this crate never
//! looks inside it. It is modeled as a validated capability set
//! ([`Bundle`]) - a default initializer, a typed island export registry,
//! and a page-level hydrate routine - resolved through a [`ModuleHost`] and
//! initialized against the binary payload path.
//!
//! # Module Structure
//!
//! - `bundle` - the capability set, its builder, and the export naming
//!   convention
//! - `payload` - binary payload header validation
//! - `host` - module resolution ([`StaticHost`], [`DirHost`])
//! - `load` - the two-step load sequence producing an [`InitializedModule`]

mod bundle;
mod host;
mod load;
mod payload;

pub use bundle::{
    Bundle, BundleBuilder, BundleError, HydrateFn, ISLAND_EXPORT_PREFIX, InitFn, InitFuture,
    IslandFn, export_key,
};
pub use host::{DirHost, HostResolve, ModuleHost, StaticHost};
pub use load::{InitializedModule, LoadError, load_module};
pub use payload::{PayloadError, WASM_MAGIC, WASM_VERSION, validate_header, validate_payload_file};
