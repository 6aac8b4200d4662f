use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("Please enter a valid link.")]
    EmptyInput,
    #[error("no link with id {0}")]
    NotFound(String),
    #[error("failed to save links: {0}")]
    Store(String),
}
