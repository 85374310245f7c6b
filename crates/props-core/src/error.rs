//! Error types for props-core

/// Result type for props-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while merging property declarations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "Declarations within one hierarchy level have different declaring units: \
         {first} and {second}"
    )]
    ConflictingDeclaringUnits { first: String, second: String },

    #[error(
        "Declarations on {unit} must declare the same value for '{attribute}': \
         found {first} and {second}"
    )]
    InconsistentAttribute {
        attribute: &'static str,
        unit: String,
        first: bool,
        second: bool,
    },

    #[error(
        "Could not detect default properties resource for {unit}: {path} does not exist. \
         Either declare 'locations' or 'properties', or make the default resource available"
    )]
    DefaultResourceNotFound { unit: String, path: String },

    #[error("Failed to parse exactly one property from inlined entry [{entry}]: {reason}")]
    MalformedEntry { entry: String, reason: String },
}
