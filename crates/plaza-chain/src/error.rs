use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
  #[error("Read failed for {what}: {reason}")]
  ReadFailed { what: &'static str, reason: String },

  #[error("Transaction rejected: {0}")]
  Rejected(String),

  #[error("Fixture I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Fixture parse error: {0}")]
  Parse(#[from] serde_json::Error),
}
