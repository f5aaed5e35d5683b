use crate::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum SubtrackError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<ValidationErrors> for SubtrackError {
    fn from(errors: ValidationErrors) -> Self {
        SubtrackError::Validation(errors)
    }
}

pub type Result<T> = std::result::Result<T, SubtrackError>;
