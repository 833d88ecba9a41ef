//! Keeper configuration, read from the environment (and `.env` if present)

mod error;

use std::env;

use serde::{Deserialize, Serialize};

use plaza_core::constants::{
  DEFAULT_DEADLINE_SECS, DEFAULT_INTERVAL_SECS, DEFAULT_JITTER_MAX_SECS, DEFAULT_JITTER_MIN_SECS,
  DEFAULT_SLIPPAGE_BPS, MAX_SLIPPAGE_BPS, TOKEN_DECIMALS,
};
use plaza_core::units::parse_units;
use plaza_core::{SlippageTolerance, TokenKind};

pub use error::ConfigError;

pub const DEFAULT_FIXTURE_PATH: &str = "fixtures/vault.json";
const DEFAULT_MIN_AMOUNT: &str = "0.1";
const DEFAULT_MAX_AMOUNT: &str = "1.0";

/// Per-operation amount window in 18-decimal token units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountRange {
  pub min: u128,
  pub max: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
  pub slippage: SlippageTolerance,

  /// Tolerances above this are accepted but logged as a warning
  pub max_slippage_bps: u64,

  pub deadline_secs: u64,
  pub interval_secs: u64,
  pub jitter_min_secs: u64,
  pub jitter_max_secs: u64,

  /// Fixed scheduler seed; unset draws from entropy
  pub seed: Option<u64>,

  pub dry_run: bool,
  pub fixture_path: String,

  /// Reserve deposited per mint
  pub reserve: AmountRange,
  pub bond: AmountRange,
  pub leverage: AmountRange,
}

impl Config {
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Build from an arbitrary key lookup; unset keys take their defaults
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    let slippage_bps = read_u64(&lookup, "SLIPPAGE_TOLERANCE", DEFAULT_SLIPPAGE_BPS)?;

    let config = Self {
      slippage: SlippageTolerance::new(slippage_bps)?,
      max_slippage_bps: read_u64(&lookup, "MAX_SLIPPAGE_BPS", MAX_SLIPPAGE_BPS)?,
      deadline_secs: read_u64(&lookup, "TX_DEADLINE_SECS", DEFAULT_DEADLINE_SECS)?,
      interval_secs: read_u64(&lookup, "KEEPER_INTERVAL_SECS", DEFAULT_INTERVAL_SECS)?,
      jitter_min_secs: read_u64(&lookup, "KEEPER_JITTER_MIN_SECS", DEFAULT_JITTER_MIN_SECS)?,
      jitter_max_secs: read_u64(&lookup, "KEEPER_JITTER_MAX_SECS", DEFAULT_JITTER_MAX_SECS)?,
      seed: match lookup("KEEPER_SEED") {
        Some(raw) => Some(parse_u64("KEEPER_SEED", &raw)?),
        None => None,
      },
      dry_run: read_bool(&lookup, "DRY_RUN", false)?,
      fixture_path: lookup("PLAZA_FIXTURE").unwrap_or_else(|| DEFAULT_FIXTURE_PATH.to_string()),
      reserve: read_range(&lookup, "MIN_RESERVE_AMOUNT", "MAX_RESERVE_AMOUNT")?,
      bond: read_range(&lookup, "MIN_BOND_AMOUNT", "MAX_BOND_AMOUNT")?,
      leverage: read_range(&lookup, "MIN_LEVERAGE_AMOUNT", "MAX_LEVERAGE_AMOUNT")?,
    };

    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.interval_secs == 0 {
      return Err(ConfigError::Inconsistent("KEEPER_INTERVAL_SECS must be greater than 0".into()));
    }
    if self.jitter_min_secs > self.jitter_max_secs {
      return Err(ConfigError::Inconsistent(format!(
        "jitter window is empty: min {}s > max {}s",
        self.jitter_min_secs, self.jitter_max_secs
      )));
    }
    for (name, range) in [("reserve", self.reserve), ("bond", self.bond), ("leverage", self.leverage)] {
      if range.min > range.max {
        return Err(ConfigError::Inconsistent(format!("{} amount range has min above max", name)));
      }
    }
    Ok(())
  }

  /// Whether the configured tolerance exceeds the protocol's advisory cap
  pub fn slippage_exceeds_cap(&self) -> bool {
    self.slippage.bps() > self.max_slippage_bps
  }

  /// Amount window for redeeming `kind`
  pub fn token_range(&self, kind: TokenKind) -> AmountRange {
    match kind {
      TokenKind::Bond => self.bond,
      TokenKind::Leverage => self.leverage,
    }
  }
}

fn parse_u64(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
  raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
    key,
    value: raw.to_string(),
    reason: "expected an unsigned integer",
  })
}

fn read_u64(
  lookup: &impl Fn(&str) -> Option<String>,
  key: &'static str,
  default: u64,
) -> Result<u64, ConfigError> {
  match lookup(key) {
    Some(raw) => parse_u64(key, &raw),
    None => Ok(default),
  }
}

fn read_bool(
  lookup: &impl Fn(&str) -> Option<String>,
  key: &'static str,
  default: bool,
) -> Result<bool, ConfigError> {
  let Some(raw) = lookup(key) else {
    return Ok(default);
  };
  match raw.trim().to_ascii_lowercase().as_str() {
    "true" | "1" | "yes" => Ok(true),
    "false" | "0" | "no" | "" => Ok(false),
    _ => Err(ConfigError::InvalidValue {
      key,
      value: raw,
      reason: "expected true or false",
    }),
  }
}

fn read_amount(
  lookup: &impl Fn(&str) -> Option<String>,
  key: &'static str,
  default: &str,
) -> Result<u128, ConfigError> {
  let raw = lookup(key).unwrap_or_else(|| default.to_string());
  parse_units(&raw, TOKEN_DECIMALS).ok_or(ConfigError::InvalidValue {
    key,
    value: raw,
    reason: "expected a decimal amount with at most 18 fractional digits",
  })
}

fn read_range(
  lookup: &impl Fn(&str) -> Option<String>,
  min_key: &'static str,
  max_key: &'static str,
) -> Result<AmountRange, ConfigError> {
  Ok(AmountRange {
    min: read_amount(lookup, min_key, DEFAULT_MIN_AMOUNT)?,
    max: read_amount(lookup, max_key, DEFAULT_MAX_AMOUNT)?,
  })
}
