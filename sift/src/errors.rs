use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type returned while configuring or finalizing a filter input type.
///
/// Every variant is a programmer error surfaced synchronously at the call that caused it.
/// Collaborator failures (convention, inspector, completion hook) pass through unchanged.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// A required argument was missing.
    #[error("invalid argument `{argument}`: {message}")]
    InvalidArgument { argument: &'static str, message: String },

    /// A name argument was empty.
    #[error("`{argument}` must not be empty")]
    EmptyName { argument: &'static str },

    /// A name argument is not a valid GraphQL name.
    #[error("`{name}` is not a valid GraphQL name (argument `{argument}`)")]
    InvalidName { argument: &'static str, name: String },

    /// The convention has no name for the operation and none was given explicitly.
    #[error("operation {operation} is not configured on the filter convention (scope {scope:?})")]
    UnknownOperation { operation: i32, scope: Option<String> },

    /// A directive instance could not be turned into directive arguments.
    #[error("directive `{name}` could not be serialized: {source}")]
    Directive {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The entity inspector failed while applying attributes.
    #[error("entity inspection failed for `{entity}`: {message}")]
    Inspector { entity: String, message: String },

    /// A field completion hook rejected the merged field set.
    #[error("field completion failed: {message}")]
    Completion { message: String },

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DescriptorError {
    /// Convenience helper for a missing required argument.
    pub fn missing(argument: &'static str) -> Self {
        Self::InvalidArgument {
            argument,
            message: "value is required".to_string(),
        }
    }
}

/// Errors raised while reading `sift` configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

/// Convenience alias used throughout the descriptor API.
pub type DescriptorResult<T> = Result<T, DescriptorError>;
