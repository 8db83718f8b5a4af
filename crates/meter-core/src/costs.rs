use std::collections::BTreeMap;

use serde::Serialize;

use crate::formatting::percentage;
use crate::models::normalize_reading_type;
use crate::tariff::TariffPlan;

/// Canonical category key for unrestricted usage.
pub const ANYTIME: &str = "anytime";
/// Canonical category key for off-peak controlled-load usage.
pub const CONTROLLED_LOAD: &str = "controlled load";
/// Canonical category key for exported solar generation.
pub const SOLAR: &str = "solar";

/// kWh totals keyed by reading category.
///
/// Keys are free-text category strings as they appear in the input data;
/// the calculator normalises them at lookup time.
pub type UsageByType = BTreeMap<String, f64>;

/// Itemised cost of a usage figure set under one tariff plan.
///
/// All amounts are in dollars. `solar_credit` is stored positive and
/// subtracted in `total_cost`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub anytime_cost: f64,
    pub controlled_load_cost: f64,
    pub solar_credit: f64,
    pub supply_cost: f64,
    pub total_cost: f64,
}

/// Difference between two plans costed over the same usage figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanDelta {
    /// Dollars saved per year by switching to the comparison plan
    /// (negative when the comparison plan is dearer).
    pub annual_savings: f64,
    /// `annual_savings / 12`.
    pub monthly_savings: f64,
    /// Savings as a percentage of the current plan's total cost.
    pub savings_percent: f64,
}

// ── CostCalculator ────────────────────────────────────────────────────────────

/// Stateless collection of tariff cost calculations.
pub struct CostCalculator;

impl CostCalculator {
    /// Cost `usage` under `plan` over a period of `day_count` days.
    ///
    /// Energy rates are in cents/kWh while supply charges are in
    /// dollars/day; the energy terms divide by 100 so every component of
    /// the breakdown is in dollars.
    ///
    /// Categories other than anytime / controlled load / solar do not enter
    /// the formula; absent categories contribute zero.
    pub fn calculate(usage: &UsageByType, plan: &TariffPlan, day_count: u32) -> CostBreakdown {
        let anytime_usage = Self::usage_for(usage, ANYTIME);
        let controlled_usage = Self::usage_for(usage, CONTROLLED_LOAD);
        let solar_usage = Self::usage_for(usage, SOLAR);

        let anytime_cost = anytime_usage * plan.anytime_rate / 100.0;
        let controlled_load_cost = controlled_usage * plan.controlled_load_rate / 100.0;
        let solar_credit = solar_usage * plan.solar_feed_in / 100.0;
        let supply_cost = (plan.supply_daily_charge + plan.controlled_load_supply_daily_charge)
            * f64::from(day_count);

        CostBreakdown {
            anytime_cost,
            controlled_load_cost,
            solar_credit,
            supply_cost,
            total_cost: anytime_cost + controlled_load_cost + supply_cost - solar_credit,
        }
    }

    /// Compare the current plan's cost against a comparison plan's cost
    /// over the same usage figures.
    pub fn compare(current: &CostBreakdown, comparison: &CostBreakdown) -> PlanDelta {
        let annual_savings = current.total_cost - comparison.total_cost;
        PlanDelta {
            annual_savings,
            monthly_savings: annual_savings / 12.0,
            savings_percent: percentage(annual_savings, current.total_cost, 1),
        }
    }

    // ── Private ────────────────────────────────────────────────────────────

    /// Sum the usage recorded under any spelling of the canonical `key`.
    fn usage_for(usage: &UsageByType, key: &str) -> f64 {
        usage
            .iter()
            .filter(|(raw, _)| normalize_reading_type(raw) == key)
            .map(|(_, kwh)| kwh)
            .sum()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
