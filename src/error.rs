//! Error types for config composition.

/// Result alias used throughout the crate
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid override: {0}")]
    InvalidOverride(String),

    /// Required inputs for the GraphQL endpoint were absent after the merge.
    #[error(
        "The `graphQLEndpointPath` and/or `layoutServiceHost` configurations were not defined. \
         You may need to run `jss setup`."
    )]
    MissingEndpointInputs,
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e.to_string())
    }
}
