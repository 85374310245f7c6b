//! Applying a merged overlay onto an environment
//!
//! Locations are applied first, one source per resolved location, each at
//! the highest precedence (the last location ends up on top of the
//! group). Inlined properties are applied after all locations, into a
//! single fixed-name source, so they always hold the highest precedence
//! of the whole overlay. A resource load failure aborts before any
//! inlined properties are applied.

use tracing::{debug, trace};

use props_core::{MergedConfig, ResourceLoader, parse_inlined_properties, parse_properties_document};

use crate::source::PropertySource;
use crate::store::Environment;
use crate::{Error, Result};

/// Name of the property source holding all inlined `key=value` pairs.
///
/// Stable across repeated calls for the same environment, so re-applying
/// merges into the existing source instead of stacking duplicates.
pub const INLINED_PROPERTIES_SOURCE_NAME: &str = "Inlined Test Properties";

/// Load each location (in order) and add it as a property source with
/// the highest precedence.
///
/// `${name}` placeholders in locations resolve against the environment's
/// current values before loading.
pub fn add_location_sources(
    environment: &mut Environment,
    loader: &dyn ResourceLoader,
    locations: &[String],
) -> Result<()> {
    for location in locations {
        let resolved = environment.resolve_placeholders(location)?;
        let bytes = loader
            .load(&resolved)
            .map_err(|source| Error::ResourceLoad {
                location: resolved.clone(),
                source,
            })?;
        let entries = parse_properties_document(&String::from_utf8_lossy(&bytes));
        trace!(location = %resolved, properties = entries.len(), "adding resource property source");
        environment.add_highest_precedence(PropertySource::from_map(resolved, entries));
    }
    Ok(())
}

/// Parse inlined `key=value` entries and merge them into the single
/// source named [`INLINED_PROPERTIES_SOURCE_NAME`].
///
/// Creates the source at the highest precedence on first use; later
/// calls merge keys in place without changing its precedence position.
pub fn add_inlined_properties(environment: &mut Environment, inlined: &[String]) -> Result<()> {
    if inlined.is_empty() {
        return Ok(());
    }
    let parsed = parse_inlined_properties(inlined)?;
    debug!(properties = parsed.len(), "adding inlined properties");
    match environment.source_mut(INLINED_PROPERTIES_SOURCE_NAME) {
        Some(source) => source.extend(parsed),
        None => environment
            .add_highest_precedence(PropertySource::from_map(INLINED_PROPERTIES_SOURCE_NAME, parsed)),
    }
    Ok(())
}

/// Apply a merged overlay: all location sources first, then the inlined
/// properties on top.
pub fn apply_merged_config(
    environment: &mut Environment,
    loader: &dyn ResourceLoader,
    merged: &MergedConfig,
) -> Result<()> {
    add_location_sources(environment, loader, &merged.locations)?;
    add_inlined_properties(environment, &merged.properties)
}
