use thiserror::Error;

/// Errors raised while registering a route.
///
/// These are setup-time failures: a router that fails to register a route
/// should be treated as misconfigured, not retried per request.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A constrained parameter carried a pattern that does not compile.
    #[error("invalid pattern `{pattern}` for parameter `{name}`: {source}")]
    InvalidPattern {
        name: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
