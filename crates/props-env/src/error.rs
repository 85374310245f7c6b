//! Error types for props-env

use std::path::PathBuf;

/// Result type for props-env operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while applying property overlays
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Merge error: {0}")]
    Merge(#[from] props_core::Error),

    #[error("Failed to load properties resource {location}: {source}")]
    ResourceLoad {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unresolved placeholder '${{{name}}}' in \"{input}\"")]
    UnresolvedPlaceholder { name: String, input: String },

    #[error("Malformed placeholder in \"{input}\": missing closing brace")]
    MalformedPlaceholder { input: String },

    #[error("Circular placeholder reference while resolving \"{input}\"")]
    CircularPlaceholder { input: String },

    #[error("Failed to read declaration manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse declaration manifest {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },
}
