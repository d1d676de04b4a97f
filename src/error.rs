use thiserror::Error;

pub type PanelResult<T> = Result<T, PanelError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("invalid layout config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid duration `{0}`")]
    InvalidDuration(String),

    #[error("query dispatch failed: {0}")]
    Dispatch(String),
}
