//! Randomised operation schedule
//!
//! Each cycle draws one of `Swap` (70%), `Redemption` (20%) or `Idle` (10%),
//! then waits a uniform jitter before acting. A fixed seed replays the same
//! sequence.

use std::fmt;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use plaza_chain::Balances;
use plaza_core::constants::MIN_ELIGIBLE_BALANCE;
use plaza_core::TokenKind;

const SWAP_WEIGHT: u32 = 70;
const REDEMPTION_WEIGHT: u32 = 20;
const TOTAL_WEIGHT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  Swap,
  Redemption,
  Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  /// Deposit reserve to create tokens
  Mint(TokenKind),
  Redeem(TokenKind),
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Action::Mint(kind) => write!(f, "mint {}", kind),
      Action::Redeem(kind) => write!(f, "redeem {}", kind),
    }
  }
}

/// Swap candidates the balances can fund, each needing at least 0.01 token
pub fn eligible_actions(balances: &Balances) -> Vec<Action> {
  let mut actions = Vec::with_capacity(4);
  if balances.reserve >= MIN_ELIGIBLE_BALANCE {
    actions.push(Action::Mint(TokenKind::Bond));
    actions.push(Action::Mint(TokenKind::Leverage));
  }
  if balances.bond >= MIN_ELIGIBLE_BALANCE {
    actions.push(Action::Redeem(TokenKind::Bond));
  }
  if balances.leverage >= MIN_ELIGIBLE_BALANCE {
    actions.push(Action::Redeem(TokenKind::Leverage));
  }
  actions
}

pub struct Scheduler<R = StdRng> {
  rng: R,
  jitter_min_secs: u64,
  jitter_max_secs: u64,
}

impl Scheduler<StdRng> {
  pub fn from_seed(seed: Option<u64>, jitter_min_secs: u64, jitter_max_secs: u64) -> Self {
    let rng = match seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };
    Self::with_rng(rng, jitter_min_secs, jitter_max_secs)
  }
}

impl<R: Rng> Scheduler<R> {
  /// `jitter_min_secs` above `jitter_max_secs` collapses to the minimum
  pub fn with_rng(rng: R, jitter_min_secs: u64, jitter_max_secs: u64) -> Self {
    Self {
      rng,
      jitter_min_secs,
      jitter_max_secs: jitter_max_secs.max(jitter_min_secs),
    }
  }

  pub fn next_operation(&mut self) -> Operation {
    let roll = self.rng.gen_range(0..TOTAL_WEIGHT);
    if roll < SWAP_WEIGHT {
      Operation::Swap
    } else if roll < SWAP_WEIGHT + REDEMPTION_WEIGHT {
      Operation::Redemption
    } else {
      Operation::Idle
    }
  }

  /// Uniform pick among `candidates`
  pub fn pick(&mut self, candidates: &[Action]) -> Option<Action> {
    candidates.choose(&mut self.rng).copied()
  }

  pub fn redemption_side(&mut self) -> TokenKind {
    if self.rng.gen_bool(0.5) {
      TokenKind::Bond
    } else {
      TokenKind::Leverage
    }
  }

  pub fn jitter(&mut self) -> Duration {
    Duration::from_secs(self.rng.gen_range(self.jitter_min_secs..=self.jitter_max_secs))
  }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_core::constants::TOKEN_PRECISION;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Scheduler::from_seed(Some(7), 30, 300);
        let mut b = Scheduler::from_seed(Some(7), 30, 300);
        for _ in 0..100 {
            assert_eq!(a.next_operation(), b.next_operation());
            assert_eq!(a.jitter(), b.jitter());
            assert_eq!(a.redemption_side(), b.redemption_side());
        }
    }

    #[test]
    fn test_operation_weights() {
        let mut scheduler = Scheduler::from_seed(Some(1), 0, 0);
        let (mut swaps, mut redemptions, mut idles) = (0u32, 0u32, 0u32);
        for _ in 0..10_000 {
            match scheduler.next_operation() {
                Operation::Swap => swaps += 1,
                Operation::Redemption => redemptions += 1,
                Operation::Idle => idles += 1,
            }
        }
        assert!((6_700..7_300).contains(&swaps), "swaps {swaps}");
        assert!((1_700..2_300).contains(&redemptions), "redemptions {redemptions}");
        assert!((700..1_300).contains(&idles), "idles {idles}");
    }

    #[test]
    fn test_jitter_within_window() {
        let mut scheduler = Scheduler::from_seed(Some(3), 30, 300);
        for _ in 0..1_000 {
            let secs = scheduler.jitter().as_secs();
            assert!((30..=300).contains(&secs));
        }
        let mut fixed = Scheduler::from_seed(Some(3), 45, 10);
        assert_eq!(fixed.jitter(), Duration::from_secs(45));
    }

    #[test]
    fn test_eligibility_by_balance() {
        let none = Balances::default();
        assert!(eligible_actions(&none).is_empty());

        let balances = Balances {
            reserve: TOKEN_PRECISION / 100,
            bond: TOKEN_PRECISION / 100 - 1,
            leverage: TOKEN_PRECISION,
        };
        assert_eq!(
            eligible_actions(&balances),
            vec![
                Action::Mint(TokenKind::Bond),
                Action::Mint(TokenKind::Leverage),
                Action::Redeem(TokenKind::Leverage),
            ]
        );

        let mut scheduler = Scheduler::from_seed(Some(9), 0, 0);
        assert_eq!(scheduler.pick(&[]), None);
        let only = [Action::Redeem(TokenKind::Bond)];
        assert_eq!(scheduler.pick(&only), Some(Action::Redeem(TokenKind::Bond)));
    }
}
