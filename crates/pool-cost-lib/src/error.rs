//! Error types for cost estimation

use thiserror::Error;

/// Errors raised while validating input, fetching jobs or estimating cost.
///
/// Every variant is fatal for a run.
#[derive(Debug, Error)]
pub enum CostError {
    /// Missing credentials or organization
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Missing or unusable command-line input
    #[error("argument error: {0}")]
    Argument(String),

    /// A VM image matched none of the OS classification rules
    #[error("Unknown OS category for image: {image}")]
    UnknownImageCategory { image: String },

    /// An OS category has no entry in the rate table
    #[error("Unknown OS category: {category}")]
    UnknownCategory { category: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("API error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}

impl CostError {
    /// True for both unknown-category variants
    pub fn is_unknown_category(&self) -> bool {
        matches!(
            self,
            CostError::UnknownImageCategory { .. } | CostError::UnknownCategory { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CostError>;
