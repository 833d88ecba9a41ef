use thiserror::Error;

/// Classification outcomes of the engine. None of them carry side effects:
/// each one aborts the candidate operation before submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
  #[error("Division undefined - {0} is zero")]
  DivisionUndefined(&'static str),

  #[error("Negative residual value - total value {total_value} is below bond par backing {bond_backing} above the threshold")]
  NegativeResidualValue { total_value: u128, bond_backing: u128 },

  #[error("Snapshot incomplete - {0} unavailable and no fallback supplied")]
  SnapshotIncomplete(&'static str),

  #[error("Pool is paused")]
  PoolPaused,

  #[error("Amount {amount} below minimum {minimum}")]
  AmountBelowMinimum { amount: u128, minimum: u128 },

  #[error("Amount {amount} above maximum {maximum}")]
  AmountAboveMaximum { amount: u128, maximum: u128 },

  #[error("Invalid slippage tolerance {0} bps - must be below 10000")]
  InvalidToleranceConfig(u64),

  #[error("Insufficient balance - required {required}, available {available}")]
  InsufficientBalance { required: u128, available: u128 },

  #[error("Collateral level {0} is below 1.0 - creation disabled")]
  CollateralBelowParity(u128),

  #[error("Amount must be greater than zero")]
  ZeroAmount,

  #[error("Math overflow occurred")]
  MathOverflow,
}

pub type Result<T> = std::result::Result<T, EngineError>;
