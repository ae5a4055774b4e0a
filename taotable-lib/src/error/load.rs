//! Data loading error types

/// Errors that can occur while fetching a data set from a source URL.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The server answered with a non-200 status.
    #[error("HTTP {status} from {url}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// The requested URL.
        url: String,
    },

    /// Network error while issuing the request or reading the body.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl LoadError {
    /// Creates a new HTTP status error.
    pub fn http(status: u16, url: impl Into<String>) -> Self {
        Self::Http {
            status,
            url: url.into(),
        }
    }

    /// Returns the HTTP status code if this is a status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
        }
    }
}
