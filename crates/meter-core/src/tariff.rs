use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MeterError, Result};

/// Name of the plan configuration file looked up in the working directory.
pub const PLAN_FILE_NAME: &str = "current_plan.json";

/// An immutable electricity tariff configuration.
///
/// Energy rates are expressed in **cents per kWh**; supply charges in
/// **dollars per day**. The cost calculator performs the cents-to-dollars
/// conversion, so the two unit families must not be mixed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffPlan {
    /// Unrestricted-tariff rate (c/kWh).
    pub anytime_rate: f64,
    /// Off-peak controlled-load rate (c/kWh).
    pub controlled_load_rate: f64,
    /// Credit for energy exported to the grid (c/kWh).
    pub solar_feed_in: f64,
    /// Fixed daily supply fee ($/day).
    pub supply_daily_charge: f64,
    /// Additional daily supply fee for the controlled-load circuit ($/day).
    pub controlled_load_supply_daily_charge: f64,
}

impl Default for TariffPlan {
    /// Fallback rates used when no plan file exists.
    fn default() -> Self {
        Self {
            anytime_rate: 25.0,
            controlled_load_rate: 18.0,
            solar_feed_in: 8.0,
            supply_daily_charge: 1.20,
            controlled_load_supply_daily_charge: 0.50,
        }
    }
}

impl TariffPlan {
    /// Starting point for the transient comparison plan.
    ///
    /// These figures are user input defaults only; a comparison plan is
    /// never persisted.
    pub fn comparison_preset() -> Self {
        Self {
            anytime_rate: 23.0,
            controlled_load_rate: 17.0,
            solar_feed_in: 10.0,
            supply_daily_charge: 1.10,
            controlled_load_supply_daily_charge: 0.45,
        }
    }

    /// Default plan-file location under the user's home directory:
    /// `~/.meter-monitor/current_plan.json`.
    pub fn home_config_path() -> PathBuf {
        Self::home_config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Plan-file location rooted at `base_dir` (used for testing).
    pub fn home_config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".meter-monitor").join(PLAN_FILE_NAME)
    }

    /// Load a plan from `path`.
    ///
    /// An absent file yields the built-in defaults. A file that exists but
    /// cannot be read or parsed is an error, not a silent fallback to the
    /// defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Plan file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| MeterError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let plan: TariffPlan = serde_json::from_str(&content)?;
        debug!("Loaded plan from {}", path.display());
        Ok(plan)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
