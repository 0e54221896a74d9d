// src/error.rs

/// Card tracking error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    #[error("Card title is empty or whitespace-only: '{0}'")]
    InvalidTitle(String),

    #[error("Card already exists: {0}")]
    AlreadyExists(String),

    #[error("Card not found: {0}")]
    NotFound(String),

    #[error("Duplicated card title in the proposed order: {0}")]
    DuplicateTitle(String),

    #[error("Update schedule period must be positive, got: {0}")]
    InvalidSchedule(u32),
}

pub type Result<T> = std::result::Result<T, CardError>;
