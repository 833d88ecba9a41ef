//! Decision pipeline
//!
//! Snapshotted -> Priced -> Guarded -> Validated -> Accepted | Rejected.
//! Each stage consumes the previous stage's value; nothing is retried here.

use serde::{Deserialize, Serialize};

use crate::bounds::AmountBounds;
use crate::collateral::{compute_total_value, CollateralLevel, CollateralState};
use crate::constants::{DEFAULT_DEADLINE_SECS, DEFAULT_SLIPPAGE_BPS, TOKEN_PRECISION};
use crate::error::{EngineError, Result};
use crate::math::{mul_div_down, mul_div_up};
use crate::pricing::{reference_price, PriceQuote};
use crate::redemption::{redemption_price, RedemptionDecision};
use crate::slippage::SlippageTolerance;
use crate::state::{PoolLimits, TokenKind, VaultSnapshot};

/// Stage a decision reached before it terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionStage {
  Snapshotted,
  Priced,
  Guarded,
  Validated,
}

/// Create `kind` tokens by depositing reserve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRequest {
  pub token_kind: TokenKind,

  /// Reserve deposited (18 decimals)
  pub deposit_amount: u128,

  /// Output reported by the pool's own simulation, preferred over the model
  pub simulated_out: Option<u128>,

  pub market_price: u128,

  /// Unix time of the decision
  pub now: u64,
}

/// Burn `amount` of `kind` for reserve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionRequest {
  pub token_kind: TokenKind,
  pub amount: u128,
  pub market_price: u128,
  pub now: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintDecision {
  pub token_kind: TokenKind,
  pub deposit_amount: u128,
  pub collateral_level: CollateralLevel,
  pub reference_price: u128,

  /// Tokens expected for the deposit (18 decimals)
  pub expected_out: u128,

  pub min_amount_out: u128,
  pub deadline: u64,
  pub accepted: bool,

  #[serde(skip)]
  pub reject_reason: Option<EngineError>,

  pub stage: DecisionStage,
}

impl MintDecision {
  pub fn quote(&self) -> PriceQuote {
    PriceQuote {
      token_kind: self.token_kind,
      reference_price: self.reference_price,
      min_amount_out: self.min_amount_out,
    }
  }
}

/// Stateless apart from its parameters; one engine serves every cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engine {
  tolerance: SlippageTolerance,
  deadline_secs: u64,
}

impl Default for Engine {
  fn default() -> Self {
    Self {
      tolerance: SlippageTolerance(DEFAULT_SLIPPAGE_BPS),
      deadline_secs: DEFAULT_DEADLINE_SECS,
    }
  }
}

impl Engine {
  pub fn new(tolerance: SlippageTolerance, deadline_secs: u64) -> Self {
    Self { tolerance, deadline_secs }
  }

  pub fn tolerance(&self) -> SlippageTolerance {
    self.tolerance
  }

  pub fn deadline(&self, now: u64) -> Result<u64> {
    now.checked_add(self.deadline_secs).ok_or(EngineError::MathOverflow)
  }

  /// Price a creation against the current collateral level and gate the
  /// guarded output against the pool's creation limits.
  pub fn evaluate_mint(
    &self,
    snapshot: &VaultSnapshot,
    limits: &PoolLimits,
    request: &MintRequest,
  ) -> MintDecision {
    let mut decision = MintDecision {
      token_kind: request.token_kind,
      deposit_amount: request.deposit_amount,
      collateral_level: CollateralLevel(0),
      reference_price: 0,
      expected_out: 0,
      min_amount_out: 0,
      deadline: 0,
      accepted: false,
      reject_reason: None,
      stage: DecisionStage::Snapshotted,
    };

    if let Err(reason) = self.run_mint(snapshot, limits, request, &mut decision) {
      decision.reject_reason = Some(reason);
      return decision;
    }
    decision.accepted = true;
    decision
  }

  fn run_mint(
    &self,
    snapshot: &VaultSnapshot,
    limits: &PoolLimits,
    request: &MintRequest,
    decision: &mut MintDecision,
  ) -> Result<()> {
    if request.deposit_amount == 0 {
      return Err(EngineError::ZeroAmount);
    }

    let state = CollateralState::from_snapshot(snapshot)?;
    decision.collateral_level = state.collateral_level;
    if state.collateral_level.below_parity() {
      return Err(EngineError::CollateralBelowParity(state.collateral_level.raw()));
    }

    let price = reference_price(&state, state.collateral_level, request.token_kind, request.market_price)?;
    decision.reference_price = price;
    decision.expected_out = match request.simulated_out {
      Some(simulated) => simulated,
      None => expected_mint_out(request.deposit_amount, snapshot.oracle_price, price)?,
    };
    decision.stage = DecisionStage::Priced;

    decision.min_amount_out = self.tolerance.min_amount_out(decision.expected_out)?;
    decision.deadline = self.deadline(request.now)?;
    decision.stage = DecisionStage::Guarded;

    AmountBounds::for_creation(limits).validate(decision.min_amount_out, snapshot.paused)?;
    decision.stage = DecisionStage::Validated;
    Ok(())
  }

  /// Price a redemption at its pro-forma level and gate the raw amount
  /// against the pool's redemption minimum.
  pub fn evaluate_redemption(
    &self,
    snapshot: &VaultSnapshot,
    limits: &PoolLimits,
    request: &RedemptionRequest,
  ) -> RedemptionDecision {
    let mut decision = RedemptionDecision {
      token_kind: request.token_kind,
      amount: request.amount,
      pro_forma_collateral_level: CollateralLevel(0),
      redemption_price: 0,
      expected_out: 0,
      min_amount_out: 0,
      min_reserve_out: 0,
      deadline: 0,
      accepted: false,
      reject_reason: None,
      stage: DecisionStage::Snapshotted,
    };

    match self.run_redemption(snapshot, limits, request, &mut decision) {
      Ok(()) => decision.accepted = true,
      Err(reason) => decision.reject_reason = Some(reason),
    }
    decision
  }

  fn run_redemption(
    &self,
    snapshot: &VaultSnapshot,
    limits: &PoolLimits,
    request: &RedemptionRequest,
    decision: &mut RedemptionDecision,
  ) -> Result<()> {
    if request.amount == 0 {
      return Err(EngineError::ZeroAmount);
    }

    let state = CollateralState::from_snapshot(snapshot)?;
    let (level, price) = redemption_price(&state, request.amount, request.token_kind, request.market_price)?;
    decision.pro_forma_collateral_level = level;
    decision.redemption_price = price;
    decision.expected_out = mul_div_down(request.amount, price, TOKEN_PRECISION)
      .ok_or(EngineError::MathOverflow)?;
    decision.stage = DecisionStage::Priced;

    decision.min_amount_out = self.tolerance.min_amount_out(decision.expected_out)?;
    decision.min_reserve_out = if snapshot.oracle_price == 0 {
      0
    } else {
      mul_div_up(decision.min_amount_out, TOKEN_PRECISION, snapshot.oracle_price)
        .ok_or(EngineError::MathOverflow)?
    };
    decision.deadline = self.deadline(request.now)?;
    decision.stage = DecisionStage::Guarded;

    AmountBounds::for_redemption(limits).validate(request.amount, snapshot.paused)?;
    decision.stage = DecisionStage::Validated;
    Ok(())
  }
}

/// Tokens a reserve deposit buys at `price` quote units per token
pub fn expected_mint_out(deposit_amount: u128, oracle_price: u128, price: u128) -> Result<u128> {
  if price == 0 {
    return Err(EngineError::DivisionUndefined("reference price"));
  }
  let deposit_value = compute_total_value(deposit_amount, oracle_price)?;
  mul_div_down(deposit_value, TOKEN_PRECISION, price).ok_or(EngineError::MathOverflow)
}
