use thiserror::Error;

#[derive(Error, Debug)]
pub enum HirumeshiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid map URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Map URL cannot take a search path: {0}")]
    NotABase(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, HirumeshiError>;
