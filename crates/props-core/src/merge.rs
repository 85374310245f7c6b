//! Merge of layered property declarations
//!
//! Declarations are grouped by hierarchy level, folded into one normalized
//! record per level (reversed meta-distance order, consistency-checked),
//! then reduced across levels into a single [`MergedConfig`]. The two
//! reduction passes are independent: a level can stop inheriting locations
//! while its properties keep inheriting, and vice versa.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::declaration::{
    Declaration, DeclarationResolver, MergedConfig, NormalizedAttributes, UnitName,
};
use crate::location::canonicalize_locations;
use crate::resource::ResourceLoader;
use crate::{Error, Result};

/// Resolve and merge all property declarations for `unit`.
///
/// A unit without declarations yields an empty [`MergedConfig`].
pub fn merge_configuration(
    unit: &UnitName,
    resolver: &dyn DeclarationResolver,
    resources: &dyn ResourceLoader,
) -> Result<MergedConfig> {
    let declarations = resolver.resolve(unit);
    if declarations.is_empty() {
        trace!(unit = %unit, "no property declarations");
        return Ok(MergedConfig::default());
    }

    let attributes = resolve_attributes(declarations, resources)?;
    let merged = MergedConfig {
        locations: merge_locations(&attributes),
        properties: merge_properties(&attributes),
    };
    debug!(
        unit = %unit,
        locations = ?merged.locations,
        properties = ?merged.properties,
        "resolved property overlay"
    );
    Ok(merged)
}

/// Group declarations by level and merge each level into one record.
///
/// Output is ordered most-derived level first.
pub fn resolve_attributes(
    declarations: Vec<Declaration>,
    resources: &dyn ResourceLoader,
) -> Result<Vec<NormalizedAttributes>> {
    let mut resolved = Vec::new();
    for (level, group) in group_by_level(declarations) {
        trace!(level, declarations = group.len(), "merging level");
        if let Some(attributes) = merge_level(group, resources)? {
            resolved.push(attributes);
        }
    }
    Ok(resolved)
}

/// Group declarations by aggregate level index, ascending, preserving the
/// resolver's intra-level order.
pub fn group_by_level(declarations: Vec<Declaration>) -> Vec<(usize, Vec<Declaration>)> {
    let mut levels: BTreeMap<usize, Vec<Declaration>> = BTreeMap::new();
    for declaration in declarations {
        levels.entry(declaration.level).or_default().push(declaration);
    }
    levels.into_iter().collect()
}

/// Merge one level's declarations into a single [`NormalizedAttributes`].
///
/// Declarations are stably sorted by descending meta-distance so that more
/// directly present declarations are folded later and win. All
/// declarations in the level must agree on declaring unit and both inherit
/// flags. A level that folds to no locations and no properties falls back
/// to the declaring unit's conventional default resource; a missing
/// default resource is fatal.
///
/// Returns `None` for an empty declaration list.
pub fn merge_level(
    mut declarations: Vec<Declaration>,
    resources: &dyn ResourceLoader,
) -> Result<Option<NormalizedAttributes>> {
    // Reversed meta-distance: most meta-distant first, directly present
    // last, following the last-one-wins overriding principle.
    declarations.sort_by(|a, b| b.distance.cmp(&a.distance));

    let mut declaring_unit: Option<UnitName> = None;
    let mut inherit_locations: Option<bool> = None;
    let mut inherit_properties: Option<bool> = None;
    let mut locations = Vec::new();
    let mut properties = Vec::new();

    for declaration in &declarations {
        if let Some(unit) = &declaring_unit {
            if *unit != declaration.declaring_unit {
                return Err(Error::ConflictingDeclaringUnits {
                    first: unit.to_string(),
                    second: declaration.declaring_unit.to_string(),
                });
            }
        }
        declaring_unit = Some(declaration.declaring_unit.clone());

        check_consistent(
            "inherit_locations",
            &declaration.declaring_unit,
            inherit_locations,
            declaration.inherit_locations,
        )?;
        inherit_locations = Some(declaration.inherit_locations);

        check_consistent(
            "inherit_properties",
            &declaration.declaring_unit,
            inherit_properties,
            declaration.inherit_properties,
        )?;
        inherit_properties = Some(declaration.inherit_properties);

        trace!(
            unit = %declaration.declaring_unit,
            distance = declaration.distance,
            "folding declaration"
        );
        locations.extend(declaration.locations.iter().cloned());
        properties.extend(declaration.properties.iter().cloned());
    }

    let (Some(declaring_unit), Some(inherit_locations), Some(inherit_properties)) =
        (declaring_unit, inherit_locations, inherit_properties)
    else {
        return Ok(None);
    };

    // A level that declares nothing at all falls back to the conventional
    // default resource for its declaring unit.
    if locations.is_empty() && properties.is_empty() {
        locations.push(detect_default_resource(&declaring_unit, resources)?);
    }

    Ok(Some(NormalizedAttributes {
        declaring_unit,
        locations,
        properties,
        inherit_locations,
        inherit_properties,
    }))
}

fn check_consistent(
    attribute: &'static str,
    unit: &UnitName,
    tracked: Option<bool>,
    current: bool,
) -> Result<()> {
    match tracked {
        Some(previous) if previous != current => Err(Error::InconsistentAttribute {
            attribute,
            unit: unit.to_string(),
            first: previous,
            second: current,
        }),
        _ => Ok(()),
    }
}

fn detect_default_resource(unit: &UnitName, resources: &dyn ResourceLoader) -> Result<String> {
    let path = unit.default_resource_path();
    if resources.exists(&path) {
        debug!(unit = %unit, path = %path, "detected default properties resource");
        // Already root-relative: return it in rooted form so location
        // canonicalization strips the slash instead of prefixing the
        // unit's resource directory a second time.
        Ok(format!("/{path}"))
    } else {
        Err(Error::DefaultResourceNotFound {
            unit: unit.to_string(),
            path,
        })
    }
}

/// Reduce per-level locations into one precedence-ordered sequence.
///
/// Levels are visited most-derived first; each level's canonicalized
/// locations are prepended, so the final order runs least-derived first
/// and most-derived last. A level with `inherit_locations = false` stops
/// the walk after its own entries are added.
pub fn merge_locations(attributes: &[NormalizedAttributes]) -> Vec<String> {
    let mut locations: Vec<String> = Vec::new();
    for attrs in attributes {
        let canonical = canonicalize_locations(&attrs.declaring_unit, &attrs.locations);
        locations.splice(0..0, canonical);
        if !attrs.inherit_locations {
            break;
        }
    }
    locations
}

/// Reduce per-level inlined properties into one precedence-ordered
/// sequence. Same walk as [`merge_locations`] but gated on
/// `inherit_properties`, independently of the locations pass.
pub fn merge_properties(attributes: &[NormalizedAttributes]) -> Vec<String> {
    let mut properties: Vec<String> = Vec::new();
    for attrs in attributes {
        properties.splice(0..0, attrs.properties.iter().cloned());
        if !attrs.inherit_properties {
            break;
        }
    }
    properties
}
