//! Log subscriber bootstrap.

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "info";

/// Resolves the filter: explicit directive, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`].
///
/// # Errors
///
/// Fails when `directive` does not parse.
pub fn filter(directive: Option<&str>) -> Result<EnvFilter> {
    match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter '{directive}'")),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Installs the global `fmt` subscriber.
///
/// # Errors
///
/// Fails on a bad filter or when a subscriber is already installed.
pub fn init(directive: Option<&str>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(directive)?)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))
}
