//! Error types for the caltorss pipeline.

use thiserror::Error;

/// Errors that can occur while turning a calendar into a feed.
#[derive(Error, Debug)]
pub enum CalToRssError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid compressed token: {0}")]
    Decode(String),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("Feed serialization error: {0}")]
    Xml(#[from] quick_xml::Error),
}

impl CalToRssError {
    /// Whether the failure came from the remote calendar (fetch or parse)
    /// rather than from the caller's input.
    pub fn is_upstream(&self) -> bool {
        matches!(self, CalToRssError::Fetch(_) | CalToRssError::IcsParse(_))
    }
}

/// Why a calendar could not be retrieved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// DNS, connect, TLS, timeout or body read failure.
    #[error("network error: {0}")]
    Network(String),

    /// The origin answered with a status outside 2xx.
    #[error("calendar origin returned HTTP {0}")]
    HttpStatus(u16),
}

/// Coarse reason for a [`FetchError`], without the detail text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchReason {
    NetworkError,
    HttpStatus(u16),
}

impl FetchError {
    pub fn reason(&self) -> FetchReason {
        match self {
            FetchError::Network(_) => FetchReason::NetworkError,
            FetchError::HttpStatus(code) => FetchReason::HttpStatus(*code),
        }
    }
}

/// Result type alias for caltorss operations.
pub type CalToRssResult<T> = Result<T, CalToRssError>;
