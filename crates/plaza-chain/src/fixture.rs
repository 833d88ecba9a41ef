//! JSON-backed snapshot source

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use plaza_core::constants::TOKEN_PRECISION;
use plaza_core::{PoolLimits, SnapshotReads, TokenKind};

use crate::error::ChainError;
use crate::orders::{Asset, Balances, CreateRates, MarketPrices};
use crate::source::SnapshotSource;

/// Everything a source reports, in one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureState {
  pub vault: SnapshotReads,
  pub market_prices: MarketPrices,
  pub limits: PoolLimits,
  #[serde(default)]
  pub balances: Balances,
  /// Absent when the pool offers no create simulation
  #[serde(default)]
  pub create_rates: Option<CreateRates>,
}

#[derive(Debug, Clone)]
pub struct FixtureSource {
  state: FixtureState,
}

impl FixtureSource {
  pub fn new(state: FixtureState) -> Self {
    Self { state }
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ChainError> {
    let content = fs::read_to_string(path)?;
    Self::from_json(&content)
  }

  pub fn from_json(content: &str) -> Result<Self, ChainError> {
    Ok(Self::new(serde_json::from_str(content)?))
  }

  pub fn state(&self) -> &FixtureState {
    &self.state
  }

  pub fn state_mut(&mut self) -> &mut FixtureState {
    &mut self.state
  }
}

impl SnapshotSource for FixtureSource {
  fn read_vault(&self) -> Result<SnapshotReads, ChainError> {
    Ok(self.state.vault.clone())
  }

  fn market_price(&self, kind: TokenKind) -> Result<u128, ChainError> {
    Ok(self.state.market_prices.of(kind))
  }

  fn pool_limits(&self) -> Result<PoolLimits, ChainError> {
    Ok(self.state.limits)
  }

  fn simulate_create(&self, kind: TokenKind, deposit: u128) -> Result<Option<u128>, ChainError> {
    let Some(rates) = self.state.create_rates else {
      return Ok(None);
    };
    deposit
      .checked_mul(rates.of(kind))
      .map(|scaled| Some(scaled / TOKEN_PRECISION))
      .ok_or(ChainError::ReadFailed {
        what: "simulate_create",
        reason: "deposit times rate overflows".into(),
      })
  }

  fn balance(&self, asset: Asset) -> Result<u128, ChainError> {
    Ok(self.state.balances.of(asset))
  }
}
