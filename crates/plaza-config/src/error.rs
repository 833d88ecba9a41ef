use thiserror::Error;

use plaza_core::EngineError;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Invalid value {value:?} for {key}: {reason}")]
  InvalidValue {
    key: &'static str,
    value: String,
    reason: &'static str,
  },

  #[error("Invalid configuration: {0}")]
  Inconsistent(String),

  #[error(transparent)]
  Engine(#[from] EngineError),
}
