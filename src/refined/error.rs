use thiserror::Error;

#[derive(Error, Debug)]
pub enum RefinedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unrecognized refinement type: {0}")]
    UnrecognizedRefinement(String),

    #[error("No refinement at index {0}")]
    IndexOutOfRange(usize),
}

pub type Result<T> = std::result::Result<T, RefinedError>;
