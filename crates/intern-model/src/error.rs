use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid year: '{0}'")]
    InvalidYear(String),
    #[error("record is not a JSON object")]
    NotAnObject,
    #[error("cannot increment non-numeric field '{field}'")]
    NotNumeric { field: String },
    #[error("cannot add to non-array field '{field}'")]
    NotAnArray { field: String },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
