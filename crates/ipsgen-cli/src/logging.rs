//! Log subscriber setup

use anyhow::{Context, Result, anyhow};
use ipsgen_core::{IpsProjectConfig, PROJECT_FILE};
use std::path::Path;
use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "info";

/// Install the stderr subscriber.
///
/// The filter is the first of: `--log-level`, `RUST_LOG`, the project's
/// `[logging] level`, `info`.
pub fn init(cli_level: Option<&str>, project_dir: Option<&Path>) -> Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let config = project_dir
        .and_then(|dir| IpsProjectConfig::from_file(dir.join(PROJECT_FILE)).ok())
        .map(|config| config.logging.level);

    let directive = filter_directive(cli_level, env.as_deref(), config.as_deref());
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("Invalid log filter: {directive}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("Failed to install log subscriber: {err}"))
}

fn filter_directive<'a>(
    cli: Option<&'a str>,
    env: Option<&'a str>,
    config: Option<&'a str>,
) -> &'a str {
    [cli, env, config]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|level| !level.is_empty())
        .unwrap_or(DEFAULT_LEVEL)
}
