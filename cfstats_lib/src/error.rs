//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding cached-value decoding and input validation failures.
///
/// The `Member` aggregate never returns these; only fetching and input
/// handling can fail.
#[derive(Debug)]
pub enum CfStatsError {
    /// An error from the underlying API client.
    Api(codeforces_api::Error),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for CfStatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for CfStatsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<codeforces_api::Error> for CfStatsError {
    fn from(e: codeforces_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for CfStatsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}
