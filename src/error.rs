//! Error types for the signup flow engine.
//!
//! Validation failures are deliberately *not* part of this taxonomy: a
//! validator returning a failure message is ordinary data surfaced inline
//! next to the relevant field (see `validators::ValidationOutcome`). The
//! variants here cover the remote and precondition failures that a flow can
//! recover from without losing the in-memory draft.

/// Top-level error type for the engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A role-detail save or fetch was attempted before a user id exists on
    /// the draft. Recoverable: the user must complete the personal
    /// information step first.
    #[error("No user id on the draft yet; complete the personal information step first")]
    MissingIdentity,
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Remote call errors (document extraction, record fetch, submission).
///
/// These are caught at the flow boundary and rendered as a dismissible
/// banner; they never corrupt the draft, so the user may retry without
/// re-entering prior steps.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {reason}")]
    Request { endpoint: String, reason: String },

    #[error("Server returned {status} from {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Failed to decode response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("No bearer token in the session")]
    Unauthenticated,
}

/// Result type alias for the engine.
pub type Result<T> = std::result::Result<T, Error>;
