//! Layered environment store
//!
//! An [`Environment`] holds property sources ordered by precedence: the
//! first source that defines a key wins. Overlay application inserts at
//! the highest-precedence end, so each insertion displaces the previous
//! highest.

use tracing::trace;

use crate::source::PropertySource;
use crate::{Error, Result};

// Guards against self-referential placeholder chains.
const MAX_PLACEHOLDER_DEPTH: usize = 16;

/// Precedence-ordered collection of named property sources.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    // Highest precedence first.
    sources: Vec<PropertySource>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a source at the highest precedence.
    ///
    /// If a source with the same name already exists it is removed first,
    /// so the new content takes its place at the front.
    pub fn add_highest_precedence(&mut self, source: PropertySource) {
        self.sources.retain(|existing| existing.name() != source.name());
        trace!(source = source.name(), "adding property source with highest precedence");
        self.sources.insert(0, source);
    }

    /// Look up a source by name.
    pub fn source(&self, name: &str) -> Option<&PropertySource> {
        self.sources.iter().find(|source| source.name() == name)
    }

    /// Look up a source by name, mutably.
    pub fn source_mut(&mut self, name: &str) -> Option<&mut PropertySource> {
        self.sources.iter_mut().find(|source| source.name() == name)
    }

    /// All sources, highest precedence first.
    pub fn sources(&self) -> &[PropertySource] {
        &self.sources
    }

    /// The value of `key` from the highest-precedence source defining it.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.sources.iter().find_map(|source| source.get(key))
    }

    /// Replace each `${name}` in `input` with the current value of
    /// `name`, recursively resolving placeholders inside substituted
    /// values. Unresolvable names and unterminated placeholders are
    /// fatal.
    pub fn resolve_placeholders(&self, input: &str) -> Result<String> {
        self.resolve_depth(input, 0)
    }

    fn resolve_depth(&self, input: &str, depth: usize) -> Result<String> {
        if depth > MAX_PLACEHOLDER_DEPTH {
            return Err(Error::CircularPlaceholder {
                input: input.to_string(),
            });
        }

        let mut out = String::with_capacity(input.len());
        let mut rest = input;
        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find('}') else {
                return Err(Error::MalformedPlaceholder {
                    input: input.to_string(),
                });
            };
            let name = &after[..end];
            let value = self
                .property(name)
                .ok_or_else(|| Error::UnresolvedPlaceholder {
                    name: name.to_string(),
                    input: input.to_string(),
                })?
                .to_string();
            out.push_str(&self.resolve_depth(&value, depth + 1)?);
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}
