//! Tola Islands - island activation for server-rendered pages.
//!
//! A tola site ships as static HTML. Pages that need client-side behavior
//! embed `<tola-island data-component="...">` placeholder markers during
//! rendering; everything else stays inert. This crate is the bootstrap that
//! brings those markers to life: it waits for an idle period, loads the
//! compiled client bundle and its binary payload, scans the rendered
//! document for markers, and dispatches each one to its activation routine
//! before finalizing the whole page.
//!
//! ```text
//! when_idle --> load_module --> scan --> dispatch --> hydrate()
//! (defer)       (js + wasm)    (markers)  (per island)  (page)
//! ```
//!
//! # Module Structure
//!
//! - `config` - loader configuration and request path construction
//! - `schedule` - idle gating (deferred or immediate)
//! - `module` - client bundle capability set, hosts, loading
//! - `island` - marker discovery in rendered documents
//! - `dispatch` - per-island activation and page-level finalization
//! - `bootstrap` - the run sequence and top-level error channel
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tola_islands::{Bootstrap, Bundle, LoaderConfig, StaticHost};
//!
//! let config = LoaderConfig::new("pkg", "client", "client_bg")?;
//! let bundle = Bundle::builder()
//!     .init_ready()
//!     .island("counter", |marker| {
//!         // bind behavior to this specific marker
//!         Ok(())
//!     })
//!     .hydrate(|| Ok(()))
//!     .build()?;
//!
//! let report = Bootstrap::new(config, Arc::new(StaticHost::new(bundle)))
//!     .run(&rendered_html)
//!     .await?;
//! ```

#[doc(hidden)]
pub mod logger;

pub mod bootstrap;
pub mod config;
pub mod dispatch;
pub mod island;
pub mod module;
pub mod schedule;

pub use bootstrap::{Bootstrap, BootstrapError};
pub use config::{ConfigError, LoaderConfig, RequestPaths};
pub use dispatch::{ActivationError, DispatchReport};
pub use island::{IslandMarker, Scan, ScanError};
pub use logger::set_verbose;
pub use module::{
    Bundle, BundleBuilder, BundleError, DirHost, InitializedModule, LoadError, ModuleHost,
    PayloadError, StaticHost,
};
pub use schedule::{DeadlineIdle, IdleHost, NoIdle};
