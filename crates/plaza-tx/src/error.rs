use thiserror::Error;

use plaza_chain::ChainError;
use plaza_core::EngineError;

#[derive(Debug, Error)]
pub enum TxError {
  #[error("Decision was rejected: {0}")]
  NotAccepted(EngineError),

  #[error("Decision was rejected without a reason")]
  Unaccepted,

  #[error(transparent)]
  Chain(#[from] ChainError),
}
