// src/error.rs
//! Error types for request-forwarder.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while activating a redirection policy.
///
/// These are the only errors this crate produces. Request-time failures
/// (DNS, timeouts, forwarder 4xx/5xx responses) surface from the underlying
/// transport exactly as they would for a direct call.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The forwarder token was empty or missing.
    #[error("forwarder token is required; pass the token configured on the forwarder service")]
    MissingToken,

    /// The forwarder base URL did not parse as an absolute URL.
    #[error("invalid forwarder base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The forwarder base URL has no hostname to use for the loop guard.
    #[error("forwarder base URL '{0}' has no hostname")]
    MissingForwarderHost(String),

    /// The token contains bytes that cannot appear in an HTTP header value.
    #[error("forwarder token is not a valid HTTP header value")]
    InvalidTokenValue,

    /// A required environment variable was absent.
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),
}
