//! Error types you might see while talking to a registry

use thiserror::Error;

/// Errors from registry requests and the local files they produce
#[derive(Error, Debug)]
pub enum RegistryError {
    /// invalid repository, tag, or image id format
    #[error("invalid reference format: {0:?}")]
    InvalidReferenceFormat(String),

    /// storage io error
    #[error("storage io error: {0}")]
    Storage(#[from] std::io::Error),

    /// json error
    #[error("json error: {0}")]
    JSON(#[from] serde_json::Error),

    /// network request error
    #[error("network request error: {0}")]
    NetworkRequest(#[from] reqwest::Error),

    /// invalid server url
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// value can't be used as an http header
    #[error("value can't be used as an http header: {0:?}")]
    InvalidHeader(String),

    /// the requested tag does not exist, but the repository's tags do
    #[error("Cannot find tag {tag:?} for repo {namespace}/{repo}, valid tags are listed above.")]
    TagNotFound {
        tag: String,
        namespace: String,
        repo: String,
        valid_tags: Vec<String>,
    },

    /// the repository's tag list could not be retrieved
    #[error("Error retrieving tags for repo {namespace}/{repo}")]
    TagListUnavailable { namespace: String, repo: String },
}

impl From<http::header::InvalidHeaderValue> for RegistryError {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        RegistryError::InvalidHeader(err.to_string())
    }
}

impl From<http::header::InvalidHeaderName> for RegistryError {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        RegistryError::InvalidHeader(err.to_string())
    }
}
