//! Bounds validator - pause flag and amount limits

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::state::PoolLimits;

/// Inclusive amount range; `maximum == None` means unbounded above
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountBounds {
  pub minimum: u128,
  pub maximum: Option<u128>,
}

impl AmountBounds {
  pub fn for_creation(limits: &PoolLimits) -> Self {
    Self {
      minimum: limits.min_creation_amount,
      maximum: Some(limits.max_creation_amount),
    }
  }

  pub fn for_redemption(limits: &PoolLimits) -> Self {
    Self {
      minimum: limits.min_redemption_amount,
      maximum: None,
    }
  }

  /// Classify `amount`. Pause takes precedence over range checks.
  pub fn validate(&self, amount: u128, paused: bool) -> Result<()> {
    if paused {
      return Err(EngineError::PoolPaused);
    }
    if amount < self.minimum {
      return Err(EngineError::AmountBelowMinimum { amount, minimum: self.minimum });
    }
    if let Some(maximum) = self.maximum {
      if amount > maximum {
        return Err(EngineError::AmountAboveMaximum { amount, maximum });
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> PoolLimits {
        PoolLimits {
            min_creation_amount: 100,
            max_creation_amount: 1_000,
            min_redemption_amount: 50,
        }
    }

    #[test]
    fn test_within_range_accepted() {
        let bounds = AmountBounds::for_creation(&limits());
        assert!(bounds.validate(100, false).is_ok());
        assert!(bounds.validate(1_000, false).is_ok());
    }

    #[test]
    fn test_paused_rejected_first() {
        let bounds = AmountBounds::for_creation(&limits());
        assert_eq!(bounds.validate(1, true), Err(EngineError::PoolPaused));
    }

    #[test]
    fn test_below_and_above() {
        let bounds = AmountBounds::for_creation(&limits());
        assert_eq!(
            bounds.validate(99, false),
            Err(EngineError::AmountBelowMinimum { amount: 99, minimum: 100 })
        );
        assert_eq!(
            bounds.validate(1_001, false),
            Err(EngineError::AmountAboveMaximum { amount: 1_001, maximum: 1_000 })
        );
    }

    #[test]
    fn test_redemption_has_no_maximum() {
        let bounds = AmountBounds::for_redemption(&limits());
        assert!(bounds.validate(u128::MAX, false).is_ok());
        assert!(bounds.validate(49, false).is_err());
    }
}
