use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing(service: &'static str) -> Result<()> {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  fmt()
    .with_env_filter(filter)
    .with_target(false)
    .try_init()
    .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

  tracing::info!(service, "tracing initialised");
  Ok(())
}
