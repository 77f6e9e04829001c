use thiserror::Error;

#[derive(Error, Debug)]
pub enum BidbookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Load error: {0}")]
    Load(String),

    #[error("Error importing data: {0}")]
    Import(String),

    #[error("{0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, BidbookError>;
