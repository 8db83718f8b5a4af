use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use meter_core::tariff::{TariffPlan, PLAN_FILE_NAME};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive,
/// falling back to `"info"` if the level string is not recognised.
///
/// The `log_file` parameter is accepted for forward-compatibility but file
/// logging is not yet wired – all output currently goes to stderr.
pub fn setup_logging(log_level: &str, _log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" | "CRITICAL" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Plan-file discovery ────────────────────────────────────────────────────────

/// Resolve the tariff plan file to load.
///
/// Checks, in order:
/// 1. An explicit `--plan-file` path (returned even when absent, so a typo
///    surfaces as defaults-with-a-log rather than a silently different file).
/// 2. `./current_plan.json` in the working directory.
/// 3. `~/.meter-monitor/current_plan.json`.
///
/// When none exists, the working-directory path is returned and the loader
/// falls back to the built-in default rates.
pub fn discover_plan_file(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let cwd_path = PathBuf::from(PLAN_FILE_NAME);
    if cwd_path.exists() {
        return cwd_path;
    }

    let home_path = TariffPlan::home_config_path();
    if home_path.exists() {
        return home_path;
    }

    cwd_path
}

// ── Tests ──────────────────────────────────────────────────────────────────────
