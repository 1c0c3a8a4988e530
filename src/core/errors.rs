//! Custom error types for push operations

use thiserror::Error;

/// Errors raised while talking to the Juremy app-push API
#[derive(Error, Debug)]
pub enum JuremyError {
    /// No app token configured anywhere
    #[error("Juremy app token not found. Configure it first.")]
    AppTokenNotFound,

    /// Configured app token cannot be sent as a header
    #[error("The Juremy app token contains invalid characters")]
    InvalidAppToken,

    /// API answered 401
    #[error("Juremy rejected the app token. Check that it was copied correctly.")]
    AppTokenRejected,

    /// Route setup answered 421, the browser session is probably not listening
    #[error("Could not set up routing to Juremy. Is Juremy open in your browser?")]
    RoutingSetup,

    /// The route setup response could not be understood
    #[error("Could not parse the Juremy routing response")]
    RoutingResponseParse,

    /// API answered 504
    #[error("Juremy could not reach your browser session (gateway timeout)")]
    Connection,

    /// API answered 400
    #[error("Juremy rejected the request as malformed")]
    Caller,

    /// API answered 403
    #[error("Juremy refused this device. Check the device settings in Juremy.")]
    DeviceProblem,

    /// API answered 500
    #[error("Juremy server error")]
    Server,

    /// Push kept being misrouted until the backoff ran out
    #[error("Could not push to Juremy after several retries")]
    NoSuccessAfterRetries,

    /// Language has no ISO 639-3 mapping
    #[error("Language not supported by Juremy: {code}")]
    LanguageNotSupported {
        code: String,
    },

    /// Language tag could not be parsed
    #[error("Invalid language tag: '{tag}'")]
    InvalidLanguageTag {
        tag: String,
    },

    /// Any other unexpected HTTP status
    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl JuremyError {
    /// Whether the failure was caused by the caller's input rather than upstream
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            JuremyError::LanguageNotSupported { .. } | JuremyError::InvalidLanguageTag { .. }
        )
    }

    /// Whether the failure comes from this client's own setup
    pub fn is_local_error(&self) -> bool {
        matches!(
            self,
            JuremyError::AppTokenNotFound
                | JuremyError::InvalidAppToken
                | JuremyError::Config { .. }
                | JuremyError::Io(_)
        )
    }

    /// Short machine-readable code, used by the HTTP bridge
    pub fn code(&self) -> &'static str {
        match self {
            JuremyError::AppTokenNotFound => "app_token_not_found",
            JuremyError::InvalidAppToken => "invalid_app_token",
            JuremyError::AppTokenRejected => "app_token_rejected",
            JuremyError::RoutingSetup => "routing_setup",
            JuremyError::RoutingResponseParse => "routing_response_parse",
            JuremyError::Connection => "connection",
            JuremyError::Caller => "caller",
            JuremyError::DeviceProblem => "device_problem",
            JuremyError::Server => "server",
            JuremyError::NoSuccessAfterRetries => "no_success_after_retries",
            JuremyError::LanguageNotSupported { .. } => "language_not_supported",
            JuremyError::InvalidLanguageTag { .. } => "invalid_language_tag",
            JuremyError::Api { .. } => "api_error",
            JuremyError::Config { .. } => "config",
            JuremyError::Io(_) => "io",
            JuremyError::Http(_) => "http",
            JuremyError::Json(_) => "json",
            JuremyError::Yaml(_) => "yaml",
        }
    }
}

/// Result type for push operations
pub type Result<T> = std::result::Result<T, JuremyError>;
