//! Filesystem-backed resource loading

use std::io;
use std::path::{Path, PathBuf};

use props_core::ResourceLoader;

/// [`ResourceLoader`] rooted at a base directory.
///
/// Canonical locations are joined to the root; a `file://` prefix is
/// accepted and stripped.
#[derive(Debug, Clone)]
pub struct FsResourceLoader {
    root: PathBuf,
}

impl FsResourceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, location: &str) -> PathBuf {
        let location = location.strip_prefix("file://").unwrap_or(location);
        self.root.join(location)
    }
}

impl ResourceLoader for FsResourceLoader {
    fn exists(&self, location: &str) -> bool {
        self.path_for(location).is_file()
    }

    fn load(&self, location: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.path_for(location))
    }
}
