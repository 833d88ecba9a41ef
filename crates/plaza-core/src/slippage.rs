//! Slippage guard - minimum acceptable output for a tolerance in bps

use serde::{Deserialize, Serialize};

use crate::constants::BPS_PRECISION;
use crate::error::{EngineError, Result};
use crate::math::mul_div_down;

/// Validated slippage tolerance, always below 10000 bps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct SlippageTolerance(pub(crate) u64);

impl SlippageTolerance {
  pub fn new(bps: u64) -> Result<Self> {
    if u128::from(bps) >= BPS_PRECISION {
      return Err(EngineError::InvalidToleranceConfig(bps));
    }
    Ok(Self(bps))
  }

  pub fn bps(self) -> u64 {
    self.0
  }

  /// expected * (10000 - bps) / 10000, multiplied before dividing
  pub fn min_amount_out(self, expected: u128) -> Result<u128> {
    let keep = BPS_PRECISION - u128::from(self.0);
    mul_div_down(expected, keep, BPS_PRECISION).ok_or(EngineError::MathOverflow)
  }
}

impl TryFrom<u64> for SlippageTolerance {
  type Error = EngineError;

  fn try_from(bps: u64) -> Result<Self> {
    Self::new(bps)
  }
}

impl From<SlippageTolerance> for u64 {
  fn from(tolerance: SlippageTolerance) -> Self {
    tolerance.0
  }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_percent() {
        let tolerance = SlippageTolerance::new(500).unwrap();
        assert_eq!(tolerance.min_amount_out(1_000_000).unwrap(), 950_000);
    }

    #[test]
    fn test_zero_tolerance_is_identity() {
        let tolerance = SlippageTolerance::new(0).unwrap();
        assert_eq!(tolerance.min_amount_out(123_456_789).unwrap(), 123_456_789);
    }

    #[test]
    fn test_truncates() {
        let tolerance = SlippageTolerance::new(1).unwrap();
        // 999 * 9999 / 10000 = 998.9001
        assert_eq!(tolerance.min_amount_out(999).unwrap(), 998);
    }

    #[test]
    fn test_full_tolerance_rejected() {
        assert_eq!(
            SlippageTolerance::new(10_000),
            Err(EngineError::InvalidToleranceConfig(10_000))
        );
        assert!(SlippageTolerance::new(25_000).is_err());
        assert!(SlippageTolerance::new(9_999).is_ok());
    }

    #[test]
    fn test_serde_validates() {
        assert!(serde_json::from_str::<SlippageTolerance>("10000").is_err());
        let tolerance: SlippageTolerance = serde_json::from_str("250").unwrap();
        assert_eq!(tolerance.bps(), 250);
    }
}
