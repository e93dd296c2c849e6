use thiserror::Error;

/// Failure of a single API call.
///
/// The controller treats every variant the same way: log and carry on after
/// the regular delay.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure, non-2xx status, or a body that is not the expected JSON.
    #[error("request failed: {0}")]
    Transport(String),

    /// Well-formed response with `success: false`.
    #[error("{message}")]
    Rejected { message: String },

    /// Well-formed response lacking a field the caller needs.
    #[error("response missing `{0}`")]
    MissingField(&'static str),
}

impl ApiError {
    /// Build a [`ApiError::Rejected`] from an optional server message.
    pub fn rejected(message: Option<String>) -> Self {
        ApiError::Rejected {
            message: message.unwrap_or_else(|| "no message".to_string()),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
