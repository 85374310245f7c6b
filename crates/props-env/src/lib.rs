//! Layered environment store and overlay application
//!
//! Companion to `props-core`: holds the precedence-ordered property source
//! store, a filesystem resource loader, a manifest-backed declaration
//! resolver, and the integration functions that apply a merged overlay
//! onto an environment.

pub mod error;
pub mod integrate;
pub mod loader;
pub mod manifest;
pub mod source;
pub mod store;

pub use error::{Error, Result};
pub use integrate::{
    INLINED_PROPERTIES_SOURCE_NAME, add_inlined_properties, add_location_sources,
    apply_merged_config,
};
pub use loader::FsResourceLoader;
pub use manifest::ManifestResolver;
pub use source::PropertySource;
pub use store::Environment;
