//! Resource loading seam
//!
//! Merge computation only needs existence checks (for default resource
//! detection); actual content loading happens when an overlay is applied
//! to an environment. Both go through this trait so callers decide where
//! resources live.

use std::collections::HashMap;
use std::io;

/// Loads property resources by canonical location string.
pub trait ResourceLoader {
    /// Whether a resource exists at `location`.
    fn exists(&self, location: &str) -> bool;

    /// Load the raw bytes of the resource at `location`.
    fn load(&self, location: &str) -> io::Result<Vec<u8>>;
}

/// In-memory [`ResourceLoader`] for tests and embedded callers.
#[derive(Debug, Clone, Default)]
pub struct MemoryResourceLoader {
    resources: HashMap<String, Vec<u8>>,
}

impl MemoryResourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register resource content under a canonical location.
    pub fn insert(&mut self, location: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.resources.insert(location.into(), content.into());
    }
}

impl ResourceLoader for MemoryResourceLoader {
    fn exists(&self, location: &str) -> bool {
        self.resources.contains_key(location)
    }

    fn load(&self, location: &str) -> io::Result<Vec<u8>> {
        self.resources.get(location).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no resource at {location}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_loader_roundtrip() {
        let mut loader = MemoryResourceLoader::new();
        loader.insert("suite/A.properties", "a=1");

        assert!(loader.exists("suite/A.properties"));
        assert_eq!(loader.load("suite/A.properties").unwrap(), b"a=1");
    }

    #[test]
    fn test_memory_loader_missing() {
        let loader = MemoryResourceLoader::new();
        assert!(!loader.exists("nope.properties"));
        assert_eq!(
            loader.load("nope.properties").unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }
}
