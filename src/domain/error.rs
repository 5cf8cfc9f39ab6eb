use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Please paste a YouTube URL first.")]
    EmptyInput,

    #[error("Invalid YouTube URL format.")]
    UnrecognizedUrl,

    #[error("{0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<crate::api::ApiError> for AppError {
    fn from(e: crate::api::ApiError) -> Self {
        AppError::Api(e.to_string())
    }
}
