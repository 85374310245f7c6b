//! Manifest-backed declaration resolver
//!
//! Loads per-unit property declarations from a TOML manifest, e.g.:
//!
//! ```toml
//! [[units."suite::http::ClientTests".declarations]]
//! locations = ["client.properties"]
//! properties = ["timeout=5"]
//! level = 0
//!
//! [[units."suite::http::ClientTests".declarations]]
//! level = 1
//! declaring-unit = "suite::Base"
//! locations = ["/base.properties"]
//! ```
//!
//! `declaring-unit` defaults to the unit the declarations are listed
//! under; inherit flags default to true.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use props_core::{Declaration, DeclarationResolver, UnitName};

use crate::{Error, Result};

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    units: HashMap<String, UnitEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct UnitEntry {
    #[serde(default)]
    declarations: Vec<DeclarationEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct DeclarationEntry {
    #[serde(default)]
    declaring_unit: Option<UnitName>,
    #[serde(default)]
    locations: Vec<String>,
    #[serde(default)]
    properties: Vec<String>,
    #[serde(default = "default_true")]
    inherit_locations: bool,
    #[serde(default = "default_true")]
    inherit_properties: bool,
    #[serde(default)]
    level: usize,
    #[serde(default)]
    distance: u32,
}

impl DeclarationEntry {
    fn into_declaration(self, fallback_unit: &UnitName) -> Declaration {
        Declaration {
            declaring_unit: self.declaring_unit.unwrap_or_else(|| fallback_unit.clone()),
            locations: self.locations,
            properties: self.properties,
            inherit_locations: self.inherit_locations,
            inherit_properties: self.inherit_properties,
            level: self.level,
            distance: self.distance,
        }
    }
}

/// [`DeclarationResolver`] backed by a TOML manifest file.
#[derive(Debug, Clone, Default)]
pub struct ManifestResolver {
    declarations: HashMap<UnitName, Vec<Declaration>>,
}

impl ManifestResolver {
    /// Load a manifest from `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse a manifest from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, Path::new("<inline>"))
    }

    fn parse(content: &str, origin: &Path) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content).map_err(|e| Error::ManifestParse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut declarations = HashMap::new();
        for (unit, entry) in manifest.units {
            let unit = UnitName::new(unit);
            let resolved: Vec<Declaration> = entry
                .declarations
                .into_iter()
                .map(|decl| decl.into_declaration(&unit))
                .collect();
            declarations.insert(unit, resolved);
        }
        Ok(Self { declarations })
    }

    /// Units that carry declarations in this manifest.
    pub fn units(&self) -> impl Iterator<Item = &UnitName> {
        self.declarations.keys()
    }
}

impl DeclarationResolver for ManifestResolver {
    fn resolve(&self, unit: &UnitName) -> Vec<Declaration> {
        self.declarations.get(unit).cloned().unwrap_or_default()
    }
}
