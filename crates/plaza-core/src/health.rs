//! Vault health assessment and status report

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::collateral::CollateralState;
use crate::constants::{PRECISION, QUOTE_DECIMALS, TOKEN_DECIMALS};
use crate::math::mul_div_down;
use crate::state::VaultSnapshot;
use crate::units::format_units;

const SECONDS_PER_DAY: u64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthWarning {
  PoolPaused,
  CollateralBelowParity,
  DistributionOverdue { overdue_secs: u64 },
  StaleOraclePrice,
}

impl fmt::Display for HealthWarning {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      HealthWarning::PoolPaused => f.write_str("pool is paused"),
      HealthWarning::CollateralBelowParity => f.write_str("collateral level is below 1.0"),
      HealthWarning::DistributionOverdue { overdue_secs } => {
        write!(f, "distribution period passed without distribution ({}s overdue)", overdue_secs)
      }
      HealthWarning::StaleOraclePrice => f.write_str("oracle unavailable, using fallback price"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultHealth {
  pub warnings: Vec<HealthWarning>,

  /// Elapsed share of the distribution period at PRECISION scale, capped at 1.0
  pub period_progress: u128,
}

impl VaultHealth {
  pub fn is_healthy(&self) -> bool {
    self.warnings.is_empty()
  }
}

pub fn assess_health(snapshot: &VaultSnapshot, state: &CollateralState, now: u64) -> VaultHealth {
  let mut warnings = Vec::new();

  if snapshot.paused {
    warnings.push(HealthWarning::PoolPaused);
  }
  if state.collateral_level.below_parity() {
    warnings.push(HealthWarning::CollateralBelowParity);
  }
  if snapshot.price_is_stale {
    warnings.push(HealthWarning::StaleOraclePrice);
  }

  let elapsed = now.saturating_sub(snapshot.last_distribution_time);
  if elapsed > snapshot.distribution_period {
    warnings.push(HealthWarning::DistributionOverdue {
      overdue_secs: elapsed - snapshot.distribution_period,
    });
  }

  let period_progress = if snapshot.distribution_period == 0 {
    PRECISION
  } else {
    mul_div_down(u128::from(elapsed), PRECISION, u128::from(snapshot.distribution_period))
      .unwrap_or(PRECISION)
      .min(PRECISION)
  };

  VaultHealth { warnings, period_progress }
}

/// Printable status block for one snapshot
pub struct VaultStatus<'a> {
  pub snapshot: &'a VaultSnapshot,
  pub state: &'a CollateralState,
}

impl fmt::Display for VaultStatus<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let period_days = self.snapshot.distribution_period / SECONDS_PER_DAY;
    let period_hours = (self.snapshot.distribution_period % SECONDS_PER_DAY) / 3_600;
    writeln!(f, "=== Vault Status ===")?;
    writeln!(f, "Total Value: {} USDC", format_units(self.state.total_value, QUOTE_DECIMALS))?;
    writeln!(f, "bondETH Supply: {} bondETH", format_units(self.snapshot.bond_supply, TOKEN_DECIMALS))?;
    writeln!(f, "levETH Supply: {} levETH", format_units(self.snapshot.leverage_supply, TOKEN_DECIMALS))?;
    writeln!(f, "Collateral Level: {}", self.state.collateral_level)?;
    writeln!(
      f,
      "Oracle Price: {} USDC{}",
      format_units(self.snapshot.oracle_price, QUOTE_DECIMALS),
      if self.snapshot.price_is_stale { " (fallback)" } else { "" }
    )?;
    writeln!(f, "Last Distribution: {} (unix)", self.snapshot.last_distribution_time)?;
    write!(f, "Distribution Period: {}d {}h", period_days, period_hours)
  }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOKEN_PRECISION;

    fn snapshot() -> VaultSnapshot {
        VaultSnapshot {
            reserve_amount: TOKEN_PRECISION / 20,
            bond_supply: TOKEN_PRECISION,
            leverage_supply: TOKEN_PRECISION,
            oracle_price: 3_000_000_000,
            price_is_stale: false,
            last_distribution_time: 1_000,
            distribution_period: 1_000,
            paused: false,
        }
    }

    #[test]
    fn test_healthy_vault_mid_period() {
        let snap = snapshot();
        let state = CollateralState::from_snapshot(&snap).unwrap();
        let health = assess_health(&snap, &state, 1_250);
        assert!(health.is_healthy());
        assert_eq!(health.period_progress, 250_000);
    }

    #[test]
    fn test_overdue_and_paused() {
        let mut snap = snapshot();
        snap.paused = true;
        let state = CollateralState::from_snapshot(&snap).unwrap();
        let health = assess_health(&snap, &state, 2_500);
        assert_eq!(
            health.warnings,
            vec![HealthWarning::PoolPaused, HealthWarning::DistributionOverdue { overdue_secs: 500 }]
        );
        assert_eq!(health.period_progress, PRECISION);
    }

    #[test]
    fn test_below_parity_and_stale() {
        let mut snap = snapshot();
        snap.reserve_amount = TOKEN_PRECISION / 40;
        snap.price_is_stale = true;
        let state = CollateralState::from_snapshot(&snap).unwrap();
        let health = assess_health(&snap, &state, 1_000);
        assert!(health.warnings.contains(&HealthWarning::CollateralBelowParity));
        assert!(health.warnings.contains(&HealthWarning::StaleOraclePrice));
    }

    #[test]
    fn test_status_report() {
        let snap = snapshot();
        let state = CollateralState::from_snapshot(&snap).unwrap();
        let report = VaultStatus { snapshot: &snap, state: &state }.to_string();
        assert!(report.contains("Total Value: 150 USDC"));
        assert!(report.contains("Collateral Level: 150.00%"));
    }
}
