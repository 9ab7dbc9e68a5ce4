use thiserror::Error;

use crate::model::{Principal, TweetId};

/// Stable error code constants. Callers match on these, never on the message.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TweetError {
    /// No live record for the id. Deleted tweets report this too.
    #[error("tweet {0} not found")]
    NotFound(TweetId),

    /// The caller is not the tweet's author.
    #[error("{caller} is not the author of tweet {id}")]
    Unauthorized { id: TweetId, caller: Principal },

    /// Text rejected by the store's length rules.
    #[error("{0}")]
    Validation(String),
}

impl TweetError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            TweetError::NotFound(_) => error_code::NOT_FOUND,
            TweetError::Unauthorized { .. } => error_code::UNAUTHORIZED,
            TweetError::Validation(_) => error_code::VALIDATION_FAILED,
        }
    }
}
