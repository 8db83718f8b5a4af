use clap::Parser;
use std::path::PathBuf;

/// Electricity usage and cost analysis for household meter readings
#[derive(Parser, Debug, Clone)]
#[command(
    name = "meter-monitor",
    about = "Electricity usage and cost analysis for household meter readings",
    version
)]
pub struct Settings {
    /// Path to the meter readings CSV file
    pub file: PathBuf,

    /// Tariff plan configuration file (JSON); discovered automatically when omitted
    #[arg(long)]
    pub plan_file: Option<PathBuf>,

    /// Comparison plan file (JSON); the built-in preset is used when omitted
    #[arg(long)]
    pub compare_file: Option<PathBuf>,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "auto"])]
    pub theme: String,

    /// Tab shown on startup
    #[arg(long, default_value = "readings", value_parser = ["readings", "monthly", "costs", "trends"])]
    pub tab: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse CLI arguments and resolve derived values.
    pub fn load() -> Self {
        Settings::parse().resolved()
    }

    /// Apply value overrides that depend on other flags.
    ///
    /// Currently only `--debug`, which forces the log level to `DEBUG`.
    pub fn resolved(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
