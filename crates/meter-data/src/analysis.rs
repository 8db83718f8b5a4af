//! Top-level analysis pipeline for Meter Monitor.
//!
//! Runs interpolation, aggregation, per-type statistics and the annual
//! plan comparison over a parsed reading set, returning a [`UsageAnalysis`]
//! ready for the UI layer. Everything is recomputed from the readings on
//! each call; there is no cached derived state.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use meter_core::costs::{CostBreakdown, CostCalculator, PlanDelta, UsageByType};
use meter_core::models::{DailyUsagePoint, Reading};
use meter_core::tariff::TariffPlan;

use crate::aggregator::{MonthlyPeriod, UsageAggregator};
use crate::interpolator::UsageInterpolator;

/// Days in the projection year the annual estimate is scaled to.
const PROJECTION_DAYS: u32 = 365;

// ── Public types ──────────────────────────────────────────────────────────────

/// One month of usage with its estimated cost under the current plan.
///
/// Supply charges are prorated over the month's observed data days.
#[derive(Debug, Clone)]
pub struct MonthlySummary {
    pub period: MonthlyPeriod,
    pub cost: CostBreakdown,
}

/// Daily-usage distribution statistics for one reading type.
#[derive(Debug, Clone)]
pub struct TypeUsageStats {
    pub reading_type: String,
    /// Average kWh per day across the type's interpolated series.
    pub mean_daily: f64,
    pub max_daily: f64,
    pub min_daily: f64,
    /// Number of days covered by the series.
    pub days: usize,
}

/// Annual usage and cost projection under one tariff plan.
#[derive(Debug, Clone)]
pub struct AnnualEstimate {
    /// Projected kWh per year per reading type.
    pub usage_by_type: UsageByType,
    /// Days of data the extrapolation is based on.
    pub days_in_data: i64,
    pub cost: CostBreakdown,
}

/// Current plan vs comparison plan over the same projected usage.
#[derive(Debug, Clone)]
pub struct PlanComparison {
    pub current: AnnualEstimate,
    pub comparison: AnnualEstimate,
    pub delta: PlanDelta,
}

/// The complete output of [`analyze_readings`].
#[derive(Debug, Clone)]
pub struct UsageAnalysis {
    /// The parsed readings, sorted ascending by date.
    pub readings: Vec<Reading>,
    /// Dense interpolated daily-usage series across all types.
    pub daily_usage: Vec<DailyUsagePoint>,
    /// Monthly rollups with per-month cost estimates.
    pub monthly: Vec<MonthlySummary>,
    /// Per-type daily-usage statistics.
    pub type_stats: Vec<TypeUsageStats>,
    /// Annual cost comparison, absent when the data spans zero days.
    pub annual: Option<PlanComparison>,
}

impl UsageAnalysis {
    /// Date of the earliest reading, if any.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.readings.first().map(|r| r.date)
    }

    /// Date of the latest reading, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.readings.last().map(|r| r.date)
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the full analysis pipeline over `readings`.
///
/// 1. Interpolate the dense daily-usage series.
/// 2. Aggregate by month and cost each month under `current`.
/// 3. Compute per-type usage statistics.
/// 4. Project annual usage and compare `current` against `comparison`.
pub fn analyze_readings(
    readings: Vec<Reading>,
    current: &TariffPlan,
    comparison: &TariffPlan,
) -> UsageAnalysis {
    let daily_usage = UsageInterpolator::daily_usage(&readings);

    let monthly: Vec<MonthlySummary> = UsageAggregator::aggregate_monthly(&daily_usage)
        .into_iter()
        .map(|period| {
            let cost = CostCalculator::calculate(&period.usage_by_type, current, period.days_observed);
            MonthlySummary { period, cost }
        })
        .collect();

    let type_stats = compute_type_stats(&daily_usage);
    let annual = annual_comparison(&readings, current, comparison);

    debug!(
        "Analysed {} readings into {} daily points, {} months, {} types",
        readings.len(),
        daily_usage.len(),
        monthly.len(),
        type_stats.len()
    );

    UsageAnalysis {
        readings,
        daily_usage,
        monthly,
        type_stats,
        annual,
    }
}

/// Project annual usage from `readings` and cost it under both plans.
///
/// Returns `None` when the observed window spans zero days. Types with a
/// single reading carry no projection and therefore no cost contribution.
pub fn annual_comparison(
    readings: &[Reading],
    current: &TariffPlan,
    comparison: &TariffPlan,
) -> Option<PlanComparison> {
    let annual = UsageAggregator::annual_usage(readings)?;

    let current_cost = CostCalculator::calculate(&annual.usage_by_type, current, PROJECTION_DAYS);
    let comparison_cost =
        CostCalculator::calculate(&annual.usage_by_type, comparison, PROJECTION_DAYS);
    let delta = CostCalculator::compare(&current_cost, &comparison_cost);

    Some(PlanComparison {
        current: AnnualEstimate {
            usage_by_type: annual.usage_by_type.clone(),
            days_in_data: annual.days_in_data,
            cost: current_cost,
        },
        comparison: AnnualEstimate {
            usage_by_type: annual.usage_by_type,
            days_in_data: annual.days_in_data,
            cost: comparison_cost,
        },
        delta,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Mean / max / min / day-count of the daily series, per reading type.
fn compute_type_stats(points: &[DailyUsagePoint]) -> Vec<TypeUsageStats> {
    let mut by_type: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for point in points {
        by_type
            .entry(point.reading_type.as_str())
            .or_default()
            .push(point.usage);
    }

    by_type
        .into_iter()
        .map(|(reading_type, usages)| {
            let days = usages.len();
            let sum: f64 = usages.iter().sum();
            let max_daily = usages.iter().cloned().fold(f64::MIN, f64::max);
            let min_daily = usages.iter().cloned().fold(f64::MAX, f64::min);
            TypeUsageStats {
                reading_type: reading_type.to_string(),
                mean_daily: sum / days as f64,
                max_daily,
                min_daily,
                days,
            }
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reading(d: NaiveDate, reading_type: &str, value: f64) -> Reading {
        Reading {
            date: d,
            reading_type: reading_type.to_string(),
            value,
            source: "bill".to_string(),
        }
    }

    /// One January billing cycle: 300 kWh anytime over 30 days.
    fn january_readings() -> Vec<Reading> {
        vec![
            reading(date(2024, 1, 1), "anytime", 1_000.0),
            reading(date(2024, 1, 31), "anytime", 1_300.0),
        ]
    }

    // ── analyze_readings ──────────────────────────────────────────────────

    #[test]
    fn test_full_pipeline_on_one_billing_cycle() {
        let analysis = analyze_readings(
            january_readings(),
            &TariffPlan::default(),
            &TariffPlan::comparison_preset(),
        );

        assert_eq!(analysis.readings.len(), 2);
        assert_eq!(analysis.daily_usage.len(), 30);
        assert_eq!(analysis.first_date(), Some(date(2024, 1, 1)));
        assert_eq!(analysis.last_date(), Some(date(2024, 1, 31)));

        // All 30 interpolated days fall in January.
        assert_eq!(analysis.monthly.len(), 1);
        let month = &analysis.monthly[0];
        assert_eq!(month.period.month, "2024-01");
        assert_eq!(month.period.days_observed, 30);
        assert!((month.period.usage_by_type["anytime"] - 300.0).abs() < 1e-9);

        // 300 * 25 / 100 + 1.70 * 30 = 75 + 51 = 126.
        assert!((month.cost.anytime_cost - 75.0).abs() < 1e-9);
        assert!((month.cost.supply_cost - 51.0).abs() < 1e-9);
        assert!((month.cost.total_cost - 126.0).abs() < 1e-9);
    }

    #[test]
    fn test_pipeline_type_stats() {
        let mut readings = january_readings();
        readings.push(reading(date(2024, 1, 1), "solar", 0.0));
        readings.push(reading(date(2024, 1, 11), "solar", 40.0));
        readings.sort_by_key(|r| r.date);

        let analysis = analyze_readings(
            readings,
            &TariffPlan::default(),
            &TariffPlan::comparison_preset(),
        );

        assert_eq!(analysis.type_stats.len(), 2);
        let anytime = &analysis.type_stats[0];
        assert_eq!(anytime.reading_type, "anytime");
        assert!((anytime.mean_daily - 10.0).abs() < 1e-9);
        assert!((anytime.max_daily - 10.0).abs() < 1e-9);
        assert!((anytime.min_daily - 10.0).abs() < 1e-9);
        assert_eq!(anytime.days, 30);

        let solar = &analysis.type_stats[1];
        assert_eq!(solar.reading_type, "solar");
        assert!((solar.mean_daily - 4.0).abs() < 1e-9);
        assert_eq!(solar.days, 10);
    }

    #[test]
    fn test_pipeline_empty_readings() {
        let analysis = analyze_readings(
            Vec::new(),
            &TariffPlan::default(),
            &TariffPlan::comparison_preset(),
        );
        assert!(analysis.daily_usage.is_empty());
        assert!(analysis.monthly.is_empty());
        assert!(analysis.type_stats.is_empty());
        assert!(analysis.annual.is_none());
        assert!(analysis.first_date().is_none());
    }

    // ── annual_comparison ─────────────────────────────────────────────────

    #[test]
    fn test_annual_comparison_costs_both_plans() {
        let current = TariffPlan::default();
        let cheaper = TariffPlan {
            anytime_rate: 20.0,
            ..TariffPlan::default()
        };

        let cmp = annual_comparison(&january_readings(), &current, &cheaper).unwrap();

        // 300 kWh / 30 days * 365 = 3650 kWh projected.
        assert!((cmp.current.usage_by_type["anytime"] - 3_650.0).abs() < 1e-9);
        assert_eq!(cmp.current.days_in_data, 30);

        // Current: 3650 * 0.25 + 1.70 * 365 = 912.5 + 620.5 = 1533.0
        assert!((cmp.current.cost.total_cost - 1_533.0).abs() < 1e-9);
        // Comparison: 3650 * 0.20 + 620.5 = 730 + 620.5 = 1350.5
        assert!((cmp.comparison.cost.total_cost - 1_350.5).abs() < 1e-9);

        assert!((cmp.delta.annual_savings - 182.5).abs() < 1e-9);
        assert!((cmp.delta.monthly_savings - 182.5 / 12.0).abs() < 1e-9);
        assert!(cmp.delta.savings_percent > 0.0);
    }

    #[test]
    fn test_annual_comparison_single_day_of_data() {
        let readings = vec![
            reading(date(2024, 1, 1), "anytime", 1_000.0),
            reading(date(2024, 1, 1), "anytime", 1_010.0),
        ];
        assert!(annual_comparison(
            &readings,
            &TariffPlan::default(),
            &TariffPlan::comparison_preset()
        )
        .is_none());
    }

    #[test]
    fn test_annual_comparison_solar_credit_reduces_total() {
        let readings = vec![
            reading(date(2024, 1, 1), "anytime", 1_000.0),
            reading(date(2024, 1, 31), "anytime", 1_300.0),
            reading(date(2024, 1, 1), "solar", 0.0),
            reading(date(2024, 1, 31), "solar", 150.0),
        ];
        let mut sorted = readings;
        sorted.sort_by_key(|r| r.date);

        let plan = TariffPlan::default();
        let with_solar = annual_comparison(&sorted, &plan, &plan).unwrap();
        let without_solar = annual_comparison(&january_readings(), &plan, &plan).unwrap();

        assert!(with_solar.current.cost.solar_credit > 0.0);
        assert!(with_solar.current.cost.total_cost < without_solar.current.cost.total_cost);
        // Same usage, same plan: zero savings either way.
        assert!((with_solar.delta.annual_savings).abs() < 1e-9);
    }
}
