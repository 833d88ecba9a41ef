//! Pricing engine - tiered mint/redeem reference price per token
//!
//! | token    | level > 1.2                          | level <= 1.2                             |
//! |----------|--------------------------------------|------------------------------------------|
//! | bond     | 100 (par)                            | min(market, 80% * value / bond supply)   |
//! | leverage | (value - bonds * 100) / lev supply   | min(market, 20% * value / lev supply)    |
//!
//! Prices are quote units (6 decimals) per whole (1e18) token.

use serde::{Deserialize, Serialize};

use crate::collateral::{compute_bond_backing, CollateralLevel, CollateralState};
use crate::constants::{
  BOND_CLAIM_SHARE, BOND_TARGET_PRICE, LEVERAGE_CLAIM_SHARE, PRECISION, TOKEN_PRECISION,
};
use crate::error::{EngineError, Result};
use crate::math::mul_div_down;
use crate::state::TokenKind;

/// Reference price and guarded minimum for one requested operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
  pub token_kind: TokenKind,
  pub reference_price: u128,
  pub min_amount_out: u128,
}

/// Reference price of `kind` evaluated at `level`.
///
/// `level` is usually `state.collateral_level`; bond redemptions pass their
/// pro-forma level instead. `market_price` is the pool's own quote and only
/// caps the lower tier.
pub fn reference_price(
  state: &CollateralState,
  level: CollateralLevel,
  kind: TokenKind,
  market_price: u128,
) -> Result<u128> {
  match kind {
    TokenKind::Bond => bond_price(state, level, market_price),
    TokenKind::Leverage => leverage_price(state, level, market_price),
  }
}

fn bond_price(state: &CollateralState, level: CollateralLevel, market_price: u128) -> Result<u128> {
  if level.above_threshold() {
    return Ok(BOND_TARGET_PRICE);
  }

  let backed = claim_share_price(state.total_value, BOND_CLAIM_SHARE, state.bond_supply, "bond supply")?;
  Ok(backed.min(market_price))
}

fn leverage_price(state: &CollateralState, level: CollateralLevel, market_price: u128) -> Result<u128> {
  if state.leverage_supply == 0 {
    return Err(EngineError::DivisionUndefined("leverage supply"));
  }

  if !level.above_threshold() {
    let backed = claim_share_price(
      state.total_value,
      LEVERAGE_CLAIM_SHARE,
      state.leverage_supply,
      "leverage supply",
    )?;
    return Ok(backed.min(market_price));
  }

  // Residual claim, uncapped. Value and bond count are compared in units of
  // par (value * 1e18 / 100e6 against bond_supply), then rescaled to quote.
  let value_in_bonds = state
    .total_value
    .checked_mul(TOKEN_PRECISION / BOND_TARGET_PRICE)
    .ok_or(EngineError::MathOverflow)?;

  let Some(residual) = value_in_bonds.checked_sub(state.bond_supply) else {
    return Err(EngineError::NegativeResidualValue {
      total_value: state.total_value,
      bond_backing: compute_bond_backing(state.bond_supply)?,
    });
  };

  mul_div_down(residual, BOND_TARGET_PRICE, state.leverage_supply).ok_or(EngineError::MathOverflow)
}

/// `share` of total value per whole token, `share` at PRECISION scale
fn claim_share_price(total_value: u128, share: u128, supply: u128, what: &'static str) -> Result<u128> {
  if supply == 0 {
    return Err(EngineError::DivisionUndefined(what));
  }
  // share * 1e18 / PRECISION is exact for the 80% and 20% tiers
  let factor = share * (TOKEN_PRECISION / PRECISION);
  mul_div_down(total_value, factor, supply).ok_or(EngineError::MathOverflow)
}
