use thiserror::Error;

use plaza_chain::ChainError;
use plaza_core::EngineError;
use plaza_tx::TxError;

#[derive(Debug, Error)]
pub enum KeeperError {
  #[error("Chain error: {0}")]
  Chain(#[from] ChainError),

  #[error("Engine error: {0}")]
  Engine(#[from] EngineError),

  #[error("Submission error: {0}")]
  Tx(#[from] TxError),
}
