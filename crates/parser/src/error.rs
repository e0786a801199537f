use thiserror::Error;

/// Transport failures talking to the booking site.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid site URL: {0}")]
    InvalidUrl(String),
}
