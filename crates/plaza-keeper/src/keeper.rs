use std::time::Duration;

use tracing::{debug, info, warn};

use plaza_chain::{Asset, Balances, SnapshotSource, TransactionSink};
use plaza_config::{AmountRange, Config};
use plaza_core::{
  assess_health, CollateralState, Engine, EngineError, MintRequest, RedemptionRequest, TokenKind,
  VaultHealth, VaultSnapshot, VaultStatus,
};
use plaza_tx::{submit_mint, submit_redemption, TxHistory, TxKind};

use crate::error::KeeperError;
use crate::scheduler::{eligible_actions, Action, Operation, Scheduler};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
  Idle,
  /// Nothing to do at the configured sizes
  Skipped(String),
  /// Accepted but not sent
  DryRun { min_amount_out: u128 },
  /// Accepted against a fallback oracle price, held back
  StalePrice { min_amount_out: u128 },
  Submitted { hash: String },
  Rejected(EngineError),
}

#[derive(Debug, Clone)]
pub struct CycleReport {
  pub operation: Operation,
  pub action: Option<Action>,
  pub outcome: CycleOutcome,
  pub health: VaultHealth,
}

/// Largest amount the balance and the configured window allow, if any
pub fn size_amount(balance: u128, range: AmountRange) -> Option<u128> {
  let amount = balance.min(range.max);
  (amount > 0 && amount >= range.min).then_some(amount)
}

/// Balance check for one attempt; a shortfall is logged to `history` as a failed `kind`
fn ensure_balance(
  history: &mut TxHistory,
  kind: TxKind,
  required: u128,
  available: u128,
) -> Result<(), EngineError> {
  if required > available {
    let err = EngineError::InsufficientBalance { required, available };
    warn!(%kind, required, available, "insufficient balance");
    history.record_failure(kind, err.to_string());
    return Err(err);
  }
  Ok(())
}

pub struct Keeper<S, K> {
  source: S,
  sink: K,
  engine: Engine,
  scheduler: Scheduler,
  config: Config,
}

impl<S: SnapshotSource, K: TransactionSink> Keeper<S, K> {
  pub fn new(source: S, sink: K, config: Config) -> Self {
    Self {
      source,
      sink,
      engine: Engine::new(config.slippage, config.deadline_secs),
      scheduler: Scheduler::from_seed(config.seed, config.jitter_min_secs, config.jitter_max_secs),
      config,
    }
  }

  pub fn source_mut(&mut self) -> &mut S {
    &mut self.source
  }

  pub fn sink(&self) -> &K {
    &self.sink
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Delay before the next cycle acts
  pub fn jitter(&mut self) -> Duration {
    self.scheduler.jitter()
  }

  /// Read the vault, falling back to the pool's bond quote when the oracle
  /// read fails.
  pub fn snapshot(&self) -> Result<VaultSnapshot, KeeperError> {
    let reads = self.source.read_vault()?;
    let fallback = if reads.oracle_price.is_none() {
      match self.source.market_price(TokenKind::Bond) {
        Ok(price) => {
          warn!(fallback_price = price, "oracle read failed, using pool price");
          Some(price)
        }
        Err(err) => {
          warn!(error = %err, "oracle and pool price both unavailable");
          None
        }
      }
    } else {
      None
    };
    Ok(VaultSnapshot::assemble(&reads, fallback)?)
  }

  pub fn balances(&self) -> Result<Balances, KeeperError> {
    Ok(Balances {
      reserve: self.source.balance(Asset::Reserve)?,
      bond: self.source.balance(Asset::Bond)?,
      leverage: self.source.balance(Asset::Leverage)?,
    })
  }

  /// Snapshot the vault, draw an operation and carry it out
  pub fn run_cycle(&mut self, history: &mut TxHistory, now: u64) -> Result<CycleReport, KeeperError> {
    let snapshot = self.snapshot()?;
    let state = CollateralState::from_snapshot(&snapshot)?;
    let health = assess_health(&snapshot, &state, now);
    debug!("\n{}", VaultStatus { snapshot: &snapshot, state: &state });
    for warning in &health.warnings {
      warn!(%warning, "vault health");
    }

    let operation = self.scheduler.next_operation();
    info!(?operation, collateral_level = %state.collateral_level, "cycle start");

    let action = match operation {
      Operation::Idle => None,
      Operation::Swap => {
        let balances = self.balances()?;
        self.scheduler.pick(&eligible_actions(&balances))
      }
      Operation::Redemption => Some(Action::Redeem(self.scheduler.redemption_side())),
    };

    let outcome = match (operation, action) {
      (Operation::Idle, _) => CycleOutcome::Idle,
      (_, None) => CycleOutcome::Skipped("no balance eligible for a swap".into()),
      (_, Some(action)) => self.execute(&snapshot, action, history, now)?,
    };
    info!(?operation, action = ?action, ?outcome, "cycle done");

    Ok(CycleReport { operation, action, outcome, health })
  }

  fn execute(
    &mut self,
    snapshot: &VaultSnapshot,
    action: Action,
    history: &mut TxHistory,
    now: u64,
  ) -> Result<CycleOutcome, KeeperError> {
    let (asset, range) = match action {
      Action::Mint(_) => (Asset::Reserve, self.config.reserve),
      Action::Redeem(kind) => (Asset::from(kind), self.config.token_range(kind)),
    };
    let balance = self.source.balance(asset)?;
    let Some(amount) = size_amount(balance, range) else {
      return Ok(CycleOutcome::Skipped(format!("{} balance {} below configured minimum", action, balance)));
    };

    match action {
      Action::Mint(kind) => self.mint_with(snapshot, kind, amount, history, now),
      Action::Redeem(kind) => self.redeem_with(snapshot, kind, amount, history, now),
    }
  }

  /// Deposit `deposit` reserve to create `kind` against a fresh snapshot
  pub fn mint(
    &mut self,
    kind: TokenKind,
    deposit: u128,
    history: &mut TxHistory,
    now: u64,
  ) -> Result<CycleOutcome, KeeperError> {
    let snapshot = self.snapshot()?;
    self.mint_with(&snapshot, kind, deposit, history, now)
  }

  /// Redeem `amount` of `kind` against a fresh snapshot
  pub fn redeem(
    &mut self,
    kind: TokenKind,
    amount: u128,
    history: &mut TxHistory,
    now: u64,
  ) -> Result<CycleOutcome, KeeperError> {
    let snapshot = self.snapshot()?;
    self.redeem_with(&snapshot, kind, amount, history, now)
  }

  fn mint_with(
    &mut self,
    snapshot: &VaultSnapshot,
    kind: TokenKind,
    deposit: u128,
    history: &mut TxHistory,
    now: u64,
  ) -> Result<CycleOutcome, KeeperError> {
    let tx_kind = TxKind::create(kind);
    ensure_balance(history, tx_kind, deposit, self.source.balance(Asset::Reserve)?)?;
    let limits = self.source.pool_limits()?;
    let request = MintRequest {
      token_kind: kind,
      deposit_amount: deposit,
      simulated_out: self.source.simulate_create(kind, deposit)?,
      market_price: self.source.market_price(kind)?,
      now,
    };

    let decision = self.engine.evaluate_mint(snapshot, &limits, &request);
    debug!(quote = ?decision.quote(), stage = ?decision.stage, "mint decision");
    if let Some(reason) = decision.reject_reason.clone() {
      info!(%kind, stage = ?decision.stage, %reason, "mint rejected");
      history.record_failure(tx_kind, reason.to_string());
      return Ok(CycleOutcome::Rejected(reason));
    }
    if self.config.dry_run {
      info!(%kind, deposit, min_out = decision.min_amount_out, "dry run, create not submitted");
      return Ok(CycleOutcome::DryRun { min_amount_out: decision.min_amount_out });
    }
    if snapshot.price_is_stale {
      warn!(%kind, deposit, min_out = decision.min_amount_out, "oracle price is a fallback, create not submitted");
      return Ok(CycleOutcome::StalePrice { min_amount_out: decision.min_amount_out });
    }

    let receipt = submit_mint(&mut self.sink, &decision, history)?;
    Ok(CycleOutcome::Submitted { hash: receipt.hash })
  }

  fn redeem_with(
    &mut self,
    snapshot: &VaultSnapshot,
    kind: TokenKind,
    amount: u128,
    history: &mut TxHistory,
    now: u64,
  ) -> Result<CycleOutcome, KeeperError> {
    let tx_kind = TxKind::redeem(kind);
    ensure_balance(history, tx_kind, amount, self.source.balance(Asset::from(kind))?)?;
    let limits = self.source.pool_limits()?;
    let request = RedemptionRequest {
      token_kind: kind,
      amount,
      market_price: self.source.market_price(kind)?,
      now,
    };

    let decision = self.engine.evaluate_redemption(snapshot, &limits, &request);
    debug!(?decision, "redemption decision");
    if let Some(reason) = decision.reject_reason.clone() {
      info!(%kind, stage = ?decision.stage, %reason, "redemption rejected");
      history.record_failure(tx_kind, reason.to_string());
      return Ok(CycleOutcome::Rejected(reason));
    }
    if self.config.dry_run {
      info!(
        %kind,
        amount,
        pro_forma_level = %decision.pro_forma_collateral_level,
        min_reserve_out = decision.min_reserve_out,
        "dry run, redemption not submitted"
      );
      return Ok(CycleOutcome::DryRun { min_amount_out: decision.min_reserve_out });
    }
    if snapshot.price_is_stale {
      warn!(
        %kind,
        amount,
        min_reserve_out = decision.min_reserve_out,
        "oracle price is a fallback, redemption not submitted"
      );
      return Ok(CycleOutcome::StalePrice { min_amount_out: decision.min_reserve_out });
    }

    let receipt = submit_redemption(&mut self.sink, &decision, history)?;
    Ok(CycleOutcome::Submitted { hash: receipt.hash })
  }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_chain::{CreateRates, FixtureSource, FixtureState, MarketPrices, PaperSink};
    use plaza_tx::TxKind;
    use plaza_core::constants::TOKEN_PRECISION;
    use plaza_core::{PoolLimits, SnapshotReads};
    use std::collections::HashMap;

    const ONE: u128 = TOKEN_PRECISION;

    fn state() -> FixtureState {
        FixtureState {
            vault: SnapshotReads {
                reserve_amount: Some(ONE),
                bond_supply: Some(20 * ONE),
                leverage_supply: Some(10 * ONE),
                oracle_price: Some(3_000_000_000),
                last_distribution_time: Some(0),
                distribution_period: Some(604_800),
                paused: Some(false),
            },
            market_prices: MarketPrices { bond: 98_000_000, leverage: 95_000_000 },
            limits: PoolLimits {
                min_creation_amount: ONE / 100,
                max_creation_amount: 1_000 * ONE,
                min_redemption_amount: ONE / 100,
            },
            balances: Balances { reserve: 5 * ONE, bond: 3 * ONE, leverage: 2 * ONE },
            create_rates: None,
        }
    }

    fn config(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(move |key| map.get(key).cloned()).unwrap()
    }

    fn keeper(pairs: &[(&str, &str)]) -> Keeper<FixtureSource, PaperSink> {
        Keeper::new(FixtureSource::new(state()), PaperSink::new(), config(pairs))
    }

    #[test]
    fn test_size_amount() {
        let range = AmountRange { min: ONE / 10, max: ONE };
        assert_eq!(size_amount(5 * ONE, range), Some(ONE));
        assert_eq!(size_amount(ONE / 2, range), Some(ONE / 2));
        assert_eq!(size_amount(ONE / 20, range), None);
        assert_eq!(size_amount(0, AmountRange { min: 0, max: ONE }), None);
    }

    #[test]
    fn test_oracle_fallback_marks_stale() {
        let mut keeper = keeper(&[]);
        keeper.source_mut().state_mut().vault.oracle_price = None;
        let snapshot = keeper.snapshot().unwrap();
        assert_eq!(snapshot.oracle_price, 98_000_000);
        assert!(snapshot.price_is_stale);
    }

    #[test]
    fn test_missing_supply_is_fatal() {
        let mut keeper = keeper(&[]);
        keeper.source_mut().state_mut().vault.bond_supply = None;
        assert!(matches!(
            keeper.snapshot(),
            Err(KeeperError::Engine(EngineError::SnapshotIncomplete("bond_supply")))
        ));
    }

    #[test]
    fn test_redeem_submits_order() {
        let mut keeper = keeper(&[]);
        let mut history = TxHistory::new();
        let outcome = keeper.redeem(TokenKind::Leverage, ONE, &mut history, 100).unwrap();

        assert_eq!(outcome, CycleOutcome::Submitted { hash: "paper-000000".into() });
        let order = keeper.sink().redeems[0];
        // 100 USDC per levETH, 5% slippage, converted at 3000 USDC per reserve
        assert_eq!(order.min_amount_out, (95_000_000 * ONE).div_ceil(3_000_000_000));
        assert_eq!(order.deadline, 3_700);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_redeem_more_than_balance() {
        let mut keeper = keeper(&[]);
        let mut history = TxHistory::new();
        let err = keeper.redeem(TokenKind::Bond, 4 * ONE, &mut history, 0).unwrap_err();
        assert!(matches!(
            err,
            KeeperError::Engine(EngineError::InsufficientBalance { required, available })
                if required == 4 * ONE && available == 3 * ONE
        ));
        assert!(keeper.sink().redeems.is_empty());
        let record = &history.recent(1)[0];
        assert_eq!(record.kind, TxKind::RedeemBond);
        assert!(!record.success);
        assert!(record.error.as_deref().unwrap().contains("Insufficient balance"));
    }

    #[test]
    fn test_paused_pool_rejects_without_submitting() {
        let mut keeper = keeper(&[]);
        keeper.source_mut().state_mut().vault.paused = Some(true);
        let mut history = TxHistory::new();
        let outcome = keeper.mint(TokenKind::Bond, ONE / 10, &mut history, 0).unwrap();
        assert_eq!(outcome, CycleOutcome::Rejected(EngineError::PoolPaused));
        assert!(keeper.sink().creates.is_empty());
        assert_eq!(history.len(), 1);
        assert_eq!(history.records()[0].kind, TxKind::CreateBond);
        assert_eq!(history.failures(), 1);
    }

    #[test]
    fn test_stale_price_holds_back_submission() {
        let mut keeper = keeper(&[]);
        keeper.source_mut().state_mut().vault.oracle_price = None;
        let mut history = TxHistory::new();

        // 98 USDC fallback: levETH at min(95, 20% * 98 / 10) = 1.96 USDC
        let outcome = keeper.redeem(TokenKind::Leverage, ONE, &mut history, 0).unwrap();
        assert_eq!(outcome, CycleOutcome::StalePrice { min_amount_out: 19_000_000_000_000_000 });
        assert!(keeper.sink().redeems.is_empty());
        assert!(history.is_empty());
    }

    #[test]
    fn test_mint_prefers_pool_simulation() {
        let mut keeper = keeper(&[("DRY_RUN", "true")]);
        keeper.source_mut().state_mut().create_rates = Some(CreateRates {
            bond: 29 * ONE,
            leverage: 30 * ONE,
        });
        let mut history = TxHistory::new();

        // simulated 2.9 bondETH for 0.1 reserve, less 5%
        let outcome = keeper.mint(TokenKind::Bond, ONE / 10, &mut history, 0).unwrap();
        assert_eq!(outcome, CycleOutcome::DryRun { min_amount_out: 2_755_000_000_000_000_000 });
    }

    #[test]
    fn test_dry_run_never_submits() {
        for seed in 0..50u64 {
            let seed = seed.to_string();
            let mut keeper = keeper(&[("DRY_RUN", "true"), ("KEEPER_SEED", seed.as_str())]);
            let mut history = TxHistory::new();
            let report = keeper.run_cycle(&mut history, 0).unwrap();
            assert!(!matches!(report.outcome, CycleOutcome::Submitted { .. }));
            assert!(keeper.sink().creates.is_empty() && keeper.sink().redeems.is_empty());
            assert!(history.is_empty());
        }
    }

    #[test]
    fn test_cycles_record_every_submission() {
        let mut keeper = keeper(&[("KEEPER_SEED", "11")]);
        let mut history = TxHistory::new();
        let mut submitted = 0;
        for _ in 0..30 {
            let report = keeper.run_cycle(&mut history, 0).unwrap();
            match (report.operation, &report.outcome) {
                (Operation::Idle, outcome) => assert_eq!(*outcome, CycleOutcome::Idle),
                (_, CycleOutcome::Submitted { .. }) => submitted += 1,
                (_, outcome) => panic!("unexpected outcome {outcome:?}"),
            }
            assert!(report.health.is_healthy());
        }
        assert_eq!(history.len(), submitted);
        assert_eq!(keeper.sink().creates.len() + keeper.sink().redeems.len(), submitted);
    }
}
