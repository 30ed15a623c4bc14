use thiserror::Error;
use tsunagi_core::TsunagiError;

#[derive(Error, Debug)]
pub enum GraphqlError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GraphQL errors: {}", .0.join("; "))]
    Errors(Vec<String>),

    #[error("Response has no '{0}' field")]
    MissingField(String),

    #[error("Invalid GraphQL name: {0:?}")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, GraphqlError>;

impl From<GraphqlError> for TsunagiError {
    fn from(err: GraphqlError) -> Self {
        match err {
            GraphqlError::InvalidName(_) => TsunagiError::UnprocessableEntity(err.to_string()),
            other => TsunagiError::Backend(other.to_string()),
        }
    }
}
