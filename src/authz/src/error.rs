//! Error types for role resolution

use thiserror::Error;

/// Role resolution errors
///
/// Unknown roles and permissions are never errors; queries answer `false`
/// (or `None`) for them. Only malformed input and strict max-role
/// selection produce an `AuthzError`.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Held roles that are not related through the hierarchy
    #[error("Roles '{first}' and '{second}' are not comparable in the role hierarchy")]
    IncomparableRoles {
        /// Current most senior candidate
        first: String,
        /// Role neither above nor below `first`
        second: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for role resolution operations
pub type Result<T> = std::result::Result<T, AuthzError>;
