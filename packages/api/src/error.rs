use store::StoreError;
use thiserror::Error;

/// Everything an API call can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A row came back in a shape the models do not accept.
    #[error("unexpected row shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// The auth service refused the request.
    #[error("{0}")]
    Auth(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote returned no row where one was expected.
    #[error("{0} returned no row")]
    Empty(&'static str),
}
