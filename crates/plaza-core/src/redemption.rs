//! Redemption pro-forma calculator
//!
//! A bond redemption burns bond supply, so it is priced at the collateral
//! level the pool will have after the burn. Leverage redemptions leave the
//! bond backing ratio untouched and are priced at the current level.

use serde::{Deserialize, Serialize};

use crate::collateral::{CollateralLevel, CollateralState};
use crate::constants::{BOND_TARGET_PRICE, PRECISION, TOKEN_PRECISION};
use crate::engine::DecisionStage;
use crate::error::{EngineError, Result};
use crate::pricing::reference_price;
use crate::state::TokenKind;

/// Outcome of evaluating one candidate redemption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionDecision {
  pub token_kind: TokenKind,

  /// Tokens to burn (18 decimals)
  pub amount: u128,

  pub pro_forma_collateral_level: CollateralLevel,

  /// Quote units per whole token
  pub redemption_price: u128,

  /// Expected proceeds in quote units
  pub expected_out: u128,

  /// Slippage-guarded proceeds in quote units
  pub min_amount_out: u128,

  /// `min_amount_out` expressed in reserve units at the snapshot price, rounded up
  pub min_reserve_out: u128,

  /// Unix time after which the chain should refuse the transaction
  pub deadline: u64,

  pub accepted: bool,

  #[serde(skip)]
  pub reject_reason: Option<EngineError>,

  pub stage: DecisionStage,
}

/// Projected collateral level after redeeming `amount` of `kind`
///
/// Bond: (total_value - amount * 100) / ((bond_supply - amount) * 100),
/// `CollateralLevel::MAX` once no bonds remain. A value shortfall clamps to
/// zero rather than wrapping.
pub fn pro_forma_collateral_level(
  state: &CollateralState,
  amount: u128,
  kind: TokenKind,
) -> Result<CollateralLevel> {
  if kind == TokenKind::Leverage {
    return Ok(state.collateral_level);
  }

  if amount >= state.bond_supply {
    return Ok(CollateralLevel::MAX);
  }
  let remaining_supply = state.bond_supply - amount;

  // Both sides divided by the 100e6 par: level = (value * 1e16 - amount * 1e6) / remaining
  let value_scaled = state
    .total_value
    .checked_mul(PRECISION * (TOKEN_PRECISION / BOND_TARGET_PRICE))
    .ok_or(EngineError::MathOverflow)?;
  let redeemed_scaled = amount
    .checked_mul(PRECISION)
    .ok_or(EngineError::MathOverflow)?;

  let remaining_value = value_scaled.saturating_sub(redeemed_scaled);
  Ok(CollateralLevel(remaining_value / remaining_supply))
}

/// Redemption price of `amount` of `kind`: the pricing engine evaluated at
/// the pro-forma level for bonds, the current level for leverage.
pub fn redemption_price(
  state: &CollateralState,
  amount: u128,
  kind: TokenKind,
  market_price: u128,
) -> Result<(CollateralLevel, u128)> {
  let level = pro_forma_collateral_level(state, amount, kind)?;
  let price = reference_price(state, level, kind, market_price)?;
  Ok((level, price))
}
