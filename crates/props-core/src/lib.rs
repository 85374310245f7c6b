//! Deterministic merge of layered test property declarations
//!
//! A test execution unit may carry property declarations at several
//! positions in its hierarchy chain, each naming resource locations and/or
//! inlined `key=value` pairs. This crate collapses that declaration graph
//! into two precedence-ordered sequences and parses inlined pairs into an
//! ordered map. Applying the result to a runtime environment lives in
//! `props-env`.

pub mod declaration;
pub mod error;
pub mod inlined;
pub mod location;
pub mod merge;
pub mod resource;

pub use declaration::{
    Declaration, DeclarationResolver, MergedConfig, NormalizedAttributes, StaticResolver, UnitName,
};
pub use error::{Error, Result};
pub use inlined::{InlinedPropertyMap, parse_inlined_properties, parse_properties_document};
pub use location::canonicalize_locations;
pub use merge::{merge_configuration, merge_locations, merge_properties, resolve_attributes};
pub use resource::{MemoryResourceLoader, ResourceLoader};
