//! Routing error taxonomy.
//!
//! Only [`RouteError::Validation`] ever reaches callers; every other variant
//! is absorbed inside the engine and converted into a degraded fallback
//! response.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    /// Request shape is wrong (empty message, missing session id).
    /// Rejected before any routing work; the only caller-visible error.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Remote classifier unreachable or unusable. Recovered locally.
    #[error("classification failed: {0}")]
    Classification(String),

    /// Selected specialist not found in the registry. Recovered via
    /// fallback.
    #[error("routing failed: {0}")]
    Routing(String),

    /// Specialist backend call failed. Surfaced as an apologetic fallback
    /// response, not an error.
    #[error("specialist invocation failed: {0}")]
    Invocation(String),
}

impl RouteError {
    /// Plain-language cause for user-facing fallback text.
    pub fn plain_cause(&self) -> &'static str {
        match self {
            RouteError::Validation(_) => "the request was invalid",
            RouteError::Classification(_) => "the classification service was unavailable",
            RouteError::Routing(_) => "no matching specialist could be found",
            RouteError::Invocation(_) => "the specialist backend did not respond",
        }
    }
}
