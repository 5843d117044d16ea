use thiserror::Error;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("invalid trade: {0}")]
    Validation(String),

    #[error("trade #{id} not found for owner '{owner}'")]
    NotFound { owner: String, id: u64 },

    #[error("journal file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("journal file is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JournalError>;
