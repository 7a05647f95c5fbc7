use thiserror::Error;

/// Errors returned by the DataMall feed client.
#[derive(Debug, Error)]
pub enum DatamallError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// DataMall answered with a non-2xx status.
    #[error("upstream returned HTTP {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    /// The response body was not the JSON we expected.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid feed URL '{url}': {reason}")]
    InvalidFeedUrl { url: String, reason: String },

    #[error("pagination limit reached: exceeded {max_pages} pages")]
    PaginationLimit { max_pages: usize },
}

impl DatamallError {
    /// HTTP status reported by the upstream, when there was one.
    #[must_use]
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            DatamallError::UpstreamStatus { status, .. } => Some(*status),
            DatamallError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
