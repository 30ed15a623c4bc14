use thiserror::Error;

#[derive(Error, Debug)]
pub enum TsunagiError {
    #[error("Resource not found: {resource_type}/{id}")]
    NotFound {
        resource_type: String,
        id: String,
    },

    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl TsunagiError {
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::UnprocessableEntity(message.into())
    }

    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TsunagiError>;
