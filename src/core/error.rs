//! Error types for the few fallible edges of the crate.
//!
//! Graph mutations never fail; invalid invocations are logged no-ops.
//! What can fail is turning outside text into model values and reading configuration.

/// Errors raised while converting text into schema values or exporting a snapshot
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Unknown column type: '{0}'")]
    UnknownType(String),

    #[error("Unknown cascade rule: '{0}'")]
    UnknownCascadeRule(String),

    #[error("Unknown cardinality: '{0}'")]
    UnknownCardinality(String),

    #[error("Snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration errors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a boolean (true/false/1/0/yes/no), got '{value}'")]
    InvalidBool { key: String, value: String },
}
