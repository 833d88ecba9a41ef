//! Collateral calculator - total value and collateral level of a snapshot

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
  BOND_TARGET_PRICE, COLLATERAL_THRESHOLD, PARITY_COLLATERAL_LEVEL, PRECISION, TOKEN_PRECISION,
};
use crate::error::{EngineError, Result};
use crate::math::mul_div_down;
use crate::state::VaultSnapshot;

/// Collateral level at `PRECISION` scale (1.5 = 1_500_000).
/// `CollateralLevel::MAX` stands for "no bonds to back".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CollateralLevel(pub u128);

impl CollateralLevel {
  pub const MAX: CollateralLevel = CollateralLevel(u128::MAX);
  pub const THRESHOLD: CollateralLevel = CollateralLevel(COLLATERAL_THRESHOLD);
  pub const PARITY: CollateralLevel = CollateralLevel(PARITY_COLLATERAL_LEVEL);

  pub fn raw(self) -> u128 {
    self.0
  }

  pub fn is_maximal(self) -> bool {
    self == Self::MAX
  }

  /// Strictly above 1.2; the boundary itself belongs to the lower tier
  pub fn above_threshold(self) -> bool {
    self > Self::THRESHOLD
  }

  pub fn below_parity(self) -> bool {
    self < Self::PARITY
  }
}

impl fmt::Display for CollateralLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_maximal() {
      return f.write_str("max");
    }
    // PRECISION / 100 units per percent point, two decimals
    let hundredths = self.0 / (PRECISION / 10_000);
    write!(f, "{}.{:02}%", hundredths / 100, hundredths % 100)
  }
}

/// Derived collateral figures for one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateralState {
  /// Reserve value in quote units (6 decimals)
  pub total_value: u128,

  pub collateral_level: CollateralLevel,

  pub bond_supply: u128,

  pub leverage_supply: u128,
}

impl CollateralState {
  pub fn from_snapshot(snapshot: &VaultSnapshot) -> Result<Self> {
    let total_value = compute_total_value(snapshot.reserve_amount, snapshot.oracle_price)?;
    Self::from_parts(total_value, snapshot.bond_supply, snapshot.leverage_supply)
  }

  pub fn from_parts(total_value: u128, bond_supply: u128, leverage_supply: u128) -> Result<Self> {
    Ok(Self {
      total_value,
      collateral_level: compute_collateral_level(total_value, bond_supply)?,
      bond_supply,
      leverage_supply,
    })
  }
}

/// Value of a reserve amount in quote units
///
/// # Arguments
/// * `reserve_amount` - Reserve asset amount (18 decimals)
/// * `oracle_price` - Reserve asset price (quote units, 6 decimals)
pub fn compute_total_value(reserve_amount: u128, oracle_price: u128) -> Result<u128> {
  mul_div_down(reserve_amount, oracle_price, TOKEN_PRECISION).ok_or(EngineError::MathOverflow)
}

/// Bond par backing of a bond amount in quote units, rounded down
pub fn compute_bond_backing(bond_amount: u128) -> Result<u128> {
  mul_div_down(bond_amount, BOND_TARGET_PRICE, TOKEN_PRECISION).ok_or(EngineError::MathOverflow)
}

/// Collateral level = total_value / (bond_supply * 100)
///
/// Returns `CollateralLevel::MAX` when no bonds exist
pub fn compute_collateral_level(total_value: u128, bond_supply: u128) -> Result<CollateralLevel> {
  if bond_supply == 0 {
    return Ok(CollateralLevel::MAX);
  }

  // total_value [6dp] * PRECISION * 1e18 / (bond_supply [18dp] * 100e6)
  // folds to total_value * PRECISION * (1e18 / 100e6) / bond_supply
  let scale = PRECISION * (TOKEN_PRECISION / BOND_TARGET_PRICE);
  mul_div_down(total_value, scale, bond_supply)
    .map(CollateralLevel)
    .ok_or(EngineError::MathOverflow)
}
