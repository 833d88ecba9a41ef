//! Vault snapshot - one consistent read of pool state per decision cycle
//! Snapshots are never mutated, only superseded by the next read

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Which side of the pool a price or operation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
  /// Senior claim, redeemable near par when well collateralized
  Bond,
  /// Junior claim, absorbs value above bond backing
  Leverage,
}

impl TokenKind {
  pub fn symbol(self) -> &'static str {
    match self {
      TokenKind::Bond => "bondETH",
      TokenKind::Leverage => "levETH",
    }
  }
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.symbol())
  }
}

/// Raw per-field reads as delivered by the transport. Any field may be
/// missing when its read failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotReads {
  pub reserve_amount: Option<u128>,
  pub bond_supply: Option<u128>,
  pub leverage_supply: Option<u128>,
  pub oracle_price: Option<u128>,
  pub last_distribution_time: Option<u64>,
  pub distribution_period: Option<u64>,
  pub paused: Option<bool>,
}

/// Immutable view of the pool used as the sole input to a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultSnapshot {
  /// Reserve held by the pool (18 decimals)
  pub reserve_amount: u128,

  pub bond_supply: u128,

  pub leverage_supply: u128,

  /// Reserve asset price in quote units (6 decimals)
  pub oracle_price: u128,

  /// True when `oracle_price` is the caller-supplied fallback
  pub price_is_stale: bool,

  pub last_distribution_time: u64,

  pub distribution_period: u64,

  pub paused: bool,
}

impl VaultSnapshot {
  /// Assemble a snapshot from raw reads. A missing oracle price is replaced
  /// by `fallback_price` and flagged stale; any other gap is fatal.
  pub fn assemble(reads: &SnapshotReads, fallback_price: Option<u128>) -> Result<Self> {
    let (oracle_price, price_is_stale) = match (reads.oracle_price, fallback_price) {
      (Some(price), _) => (price, false),
      (None, Some(fallback)) => (fallback, true),
      (None, None) => return Err(EngineError::SnapshotIncomplete("oracle_price")),
    };

    Ok(Self {
      reserve_amount: reads
        .reserve_amount
        .ok_or(EngineError::SnapshotIncomplete("reserve_amount"))?,
      bond_supply: reads
        .bond_supply
        .ok_or(EngineError::SnapshotIncomplete("bond_supply"))?,
      leverage_supply: reads
        .leverage_supply
        .ok_or(EngineError::SnapshotIncomplete("leverage_supply"))?,
      oracle_price,
      price_is_stale,
      last_distribution_time: reads
        .last_distribution_time
        .ok_or(EngineError::SnapshotIncomplete("last_distribution_time"))?,
      distribution_period: reads
        .distribution_period
        .ok_or(EngineError::SnapshotIncomplete("distribution_period"))?,
      paused: reads.paused.ok_or(EngineError::SnapshotIncomplete("paused"))?,
    })
  }
}

/// Pool-reported amount limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolLimits {
  pub min_creation_amount: u128,
  pub max_creation_amount: u128,
  pub min_redemption_amount: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_reads() -> SnapshotReads {
        SnapshotReads {
            reserve_amount: Some(10),
            bond_supply: Some(20),
            leverage_supply: Some(30),
            oracle_price: Some(3_000_000_000),
            last_distribution_time: Some(1_700_000_000),
            distribution_period: Some(604_800),
            paused: Some(false),
        }
    }

    #[test]
    fn test_assemble_complete_reads() {
        let snapshot = VaultSnapshot::assemble(&full_reads(), None).unwrap();
        assert_eq!(snapshot.oracle_price, 3_000_000_000);
        assert!(!snapshot.price_is_stale);
        assert_eq!(snapshot.leverage_supply, 30);
    }

    #[test]
    fn test_oracle_failure_uses_fallback() {
        let reads = SnapshotReads { oracle_price: None, ..full_reads() };
        let snapshot = VaultSnapshot::assemble(&reads, Some(2_900_000_000)).unwrap();
        assert_eq!(snapshot.oracle_price, 2_900_000_000);
        assert!(snapshot.price_is_stale);
    }

    #[test]
    fn test_fallback_ignored_when_oracle_present() {
        let snapshot = VaultSnapshot::assemble(&full_reads(), Some(1)).unwrap();
        assert_eq!(snapshot.oracle_price, 3_000_000_000);
        assert!(!snapshot.price_is_stale);
    }

    #[test]
    fn test_oracle_failure_without_fallback_is_incomplete() {
        let reads = SnapshotReads { oracle_price: None, ..full_reads() };
        assert_eq!(
            VaultSnapshot::assemble(&reads, None),
            Err(EngineError::SnapshotIncomplete("oracle_price"))
        );
    }

    #[test]
    fn test_missing_supply_is_incomplete() {
        let reads = SnapshotReads { bond_supply: None, ..full_reads() };
        assert_eq!(
            VaultSnapshot::assemble(&reads, Some(1)),
            Err(EngineError::SnapshotIncomplete("bond_supply"))
        );
    }
}
