use crate::errors::{AppError, AppResult};
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Installs a global `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter` (e.g. `"brfied=debug"`).
///
/// Later calls are no-ops. Fails only if `default_filter` is not a valid directive
/// or another global subscriber was installed elsewhere.
pub fn init(default_filter: &str) -> AppResult<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .map_err(|e| AppError::Config(format!("Invalid log filter '{default_filter}': {e}")))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| AppError::Config(format!("Failed to install tracing subscriber: {e}")))?;

    let _ = INIT.set(());
    Ok(())
}
