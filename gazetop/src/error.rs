//! Error types for the chart core and the message feed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    // Redraw needs at least one sample to compute axis bounds
    #[error("cannot redraw an empty buffer")]
    EmptyBuffer,
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Chart(#[from] ChartError),
}
