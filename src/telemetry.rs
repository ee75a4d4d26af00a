use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. `RUST_LOG` takes precedence over
/// `level`.
pub fn init(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|err| anyhow!("invalid log level '{level}': {err}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))
}
