//! Declaration model for layered test property overlays
//!
//! A test execution unit may carry zero or more property declarations,
//! each naming resource locations and/or literal `key=value` pairs. The
//! types here describe one such declaration, the merged per-level record,
//! and the final merged overlay.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Fully-qualified name of a test execution unit.
///
/// Segments are separated by `::`, e.g. `suite::http::ClientTests`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitName(String);

impl UnitName {
    /// Create a unit name from its fully-qualified form.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The fully-qualified name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory against which this unit's relative resource locations
    /// resolve: all segments but the last, joined with `/`.
    pub fn resource_dir(&self) -> String {
        match self.0.rfind("::") {
            Some(idx) => self.0[..idx].replace("::", "/"),
            None => String::new(),
        }
    }

    /// Conventional default properties resource for this unit: all
    /// segments joined with `/`, with a `.properties` suffix.
    pub fn default_resource_path(&self) -> String {
        format!("{}.properties", self.0.replace("::", "/"))
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

fn default_true() -> bool {
    true
}

/// One occurrence of a property declaration on a hierarchy unit.
///
/// Declarations are immutable once produced by the resolver. `level` is
/// the aggregate index in the hierarchy chain (0 = most derived) and
/// `distance` is the meta-presence depth within that level (0 = directly
/// present).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Declaration {
    pub declaring_unit: UnitName,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub properties: Vec<String>,
    #[serde(default = "default_true")]
    pub inherit_locations: bool,
    #[serde(default = "default_true")]
    pub inherit_properties: bool,
    #[serde(default)]
    pub level: usize,
    #[serde(default)]
    pub distance: u32,
}

impl Declaration {
    /// Create a declaration directly present on `unit` at the given level,
    /// with no locations or properties and both inherit flags set.
    pub fn new(unit: impl Into<UnitName>, level: usize) -> Self {
        Self {
            declaring_unit: unit.into(),
            locations: Vec::new(),
            properties: Vec::new(),
            inherit_locations: true,
            inherit_properties: true,
            level,
            distance: 0,
        }
    }

    pub fn with_locations<S: Into<String>>(mut self, locations: impl IntoIterator<Item = S>) -> Self {
        self.locations = locations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_properties<S: Into<String>>(mut self, properties: impl IntoIterator<Item = S>) -> Self {
        self.properties = properties.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_distance(mut self, distance: u32) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_inherit_locations(mut self, inherit: bool) -> Self {
        self.inherit_locations = inherit;
        self
    }

    pub fn with_inherit_properties(mut self, inherit: bool) -> Self {
        self.inherit_properties = inherit;
        self
    }
}

/// The single merged record for one hierarchy level.
///
/// All declarations folded into one record share the same declaring unit
/// and the same inherit flag values; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAttributes {
    pub declaring_unit: UnitName,
    pub locations: Vec<String>,
    pub properties: Vec<String>,
    pub inherit_locations: bool,
    pub inherit_properties: bool,
}

/// Final merged overlay for one unit.
///
/// Both sequences are ordered least-derived first and most-derived last,
/// so the most-derived entries end up with the highest precedence when
/// applied to an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedConfig {
    pub locations: Vec<String>,
    pub properties: Vec<String>,
}

impl MergedConfig {
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty() && self.properties.is_empty()
    }
}

/// Source of property declarations for a unit.
///
/// How declarations are discovered (attribute scanning, manifests, ...)
/// is outside this crate; implementations return them with `level` and
/// `distance` already attached, in a stable order within each level.
pub trait DeclarationResolver {
    fn resolve(&self, unit: &UnitName) -> Vec<Declaration>;
}

/// In-memory [`DeclarationResolver`] keyed by unit name.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    declarations: HashMap<UnitName, Vec<Declaration>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the declarations resolved for `unit`.
    ///
    /// Replaces any previously registered declarations for the same unit.
    pub fn register(&mut self, unit: impl Into<UnitName>, declarations: Vec<Declaration>) {
        self.declarations.insert(unit.into(), declarations);
    }
}

impl DeclarationResolver for StaticResolver {
    fn resolve(&self, unit: &UnitName) -> Vec<Declaration> {
        self.declarations.get(unit).cloned().unwrap_or_default()
    }
}
