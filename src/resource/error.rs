use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("Resource id must not be empty")]
    EmptyId,

    #[error("Resource id must not contain \"NONE\": {0}")]
    IllegalId(String),
}
