use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("chain configuration error: {0}")]
    Config(String),
}

pub type ChainResult<T> = Result<T, ChainError>;
