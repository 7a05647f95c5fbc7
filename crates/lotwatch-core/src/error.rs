use thiserror::Error;

/// Errors surfaced by the carpark view-state engine.
///
/// Every variant is recoverable: the engine never mutates state on the path
/// that produces one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The feed payload was not a usable collection of carpark entries.
    #[error("malformed carpark feed: {0}")]
    FeedFormat(String),

    /// A selection referenced an id that is not in the current record set.
    #[error("unknown carpark id: {0}")]
    UnknownCarpark(String),

    /// The location service could not produce a position.
    #[error("location unavailable: {0}")]
    LocationUnavailable(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
