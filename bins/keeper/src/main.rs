use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use plaza_chain::{FixtureSource, PaperSink};
use plaza_config::Config;
use plaza_keeper::Keeper;
use plaza_tx::TxHistory;

const RECENT_TX_LOG: usize = 5;

fn unix_now() -> Result<u64> {
  Ok(SystemTime::now().duration_since(UNIX_EPOCH).context("system clock before unix epoch")?.as_secs())
}

#[tokio::main]
async fn main() -> Result<()> {
  let config = Config::from_env().context("failed to load configuration")?;
  plaza_telemetry::init_tracing("keeper")?;

  info!(
    fixture = %config.fixture_path,
    slippage_bps = config.slippage.bps(),
    interval_secs = config.interval_secs,
    dry_run = config.dry_run,
    "starting keeper"
  );
  if config.slippage_exceeds_cap() {
    warn!(
      slippage_bps = config.slippage.bps(),
      cap_bps = config.max_slippage_bps,
      "slippage tolerance above protocol cap"
    );
  }
  if config.dry_run {
    warn!("dry run mode, no transactions will be submitted");
  }

  let source = FixtureSource::load(&config.fixture_path)
    .with_context(|| format!("failed to load fixture {}", config.fixture_path))?;
  let interval = Duration::from_secs(config.interval_secs);
  let mut keeper = Keeper::new(source, PaperSink::new(), config);
  let mut history = TxHistory::new();
  let mut iteration = 0u64;

  loop {
    let jitter = keeper.jitter();
    tokio::select! {
      _ = tokio::signal::ctrl_c() => break,
      _ = tokio::time::sleep(jitter) => {}
    }

    iteration += 1;
    match keeper.run_cycle(&mut history, unix_now()?) {
      Ok(report) => info!(iteration, operation = ?report.operation, outcome = ?report.outcome, "cycle complete"),
      Err(err) => error!(iteration, error = %err, "cycle failed"),
    }

    tokio::select! {
      _ = tokio::signal::ctrl_c() => break,
      _ = tokio::time::sleep(interval) => {}
    }
  }

  info!(iterations = iteration, transactions = history.len(), failures = history.failures(), "shutting down");
  for record in history.recent(RECENT_TX_LOG) {
    info!(
      kind = %record.kind,
      hash = record.hash.as_deref().unwrap_or("-"),
      success = record.success,
      at = %record.timestamp,
      "recent transaction"
    );
  }
  Ok(())
}
