//! Card lookup resolver seam.
//!
//! The stream reducer only needs "give me the full card for this id"; the
//! trait lets tests stub the network out entirely.

use async_trait::async_trait;

use super::Card;

/// Error type for card lookups.
///
/// Only the status matters to the UI: a failed lookup is rendered inline
/// in the transcript, it never aborts the stream.
#[derive(Debug)]
pub enum LookupError {
    /// HTTP request failed before a status was available
    Http(reqwest::Error),
    /// Backend reported a non-success status
    Status { status: u16 },
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::Http(_) => write!(f, "Failed to load card details"),
            LookupError::Status { status } => {
                write!(f, "Card lookup failed with {}", status)
            }
        }
    }
}

impl std::error::Error for LookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LookupError::Http(e) => Some(e),
            LookupError::Status { .. } => None,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        LookupError::Http(e)
    }
}

/// Fetches full card data for a normalized identifier.
#[async_trait]
pub trait CardResolver: Send + Sync {
    async fn resolve(&self, id: &str) -> Result<Card, LookupError>;
}
