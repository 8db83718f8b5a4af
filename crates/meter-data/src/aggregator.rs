//! Usage aggregation: monthly rollups and the annual projection.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use meter_core::costs::UsageByType;
use meter_core::models::{DailyUsagePoint, Reading};

// ── MonthlyPeriod ─────────────────────────────────────────────────────────────

/// All interpolated usage within one calendar month.
#[derive(Debug, Clone)]
pub struct MonthlyPeriod {
    /// The period key, e.g. `"2024-01"`.
    pub month: String,
    /// Summed daily usage per reading type.
    pub usage_by_type: UsageByType,
    /// Count of distinct days with data in this month, across all types.
    ///
    /// This is the number of *observed* days, not the calendar length of
    /// the month; supply charges are prorated over it.
    pub days_observed: u32,
}

// ── AnnualUsage ───────────────────────────────────────────────────────────────

/// Net usage per type linearly extrapolated to a 365-day year.
#[derive(Debug, Clone)]
pub struct AnnualUsage {
    /// Projected annual kWh per reading type. Types with fewer than 2
    /// readings are omitted and read as zero downstream.
    pub usage_by_type: UsageByType,
    /// Length in days of the observed window the projection is based on.
    pub days_in_data: i64,
}

// ── UsageAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that rolls daily usage into larger figures.
pub struct UsageAggregator;

impl UsageAggregator {
    /// Group daily usage points by calendar month.
    ///
    /// Returns periods sorted by month key (ascending).
    pub fn aggregate_monthly(points: &[DailyUsagePoint]) -> Vec<MonthlyPeriod> {
        let mut map: BTreeMap<String, (UsageByType, BTreeSet<NaiveDate>)> = BTreeMap::new();

        for point in points {
            let key = point.date.format("%Y-%m").to_string();
            let (usage, days) = map.entry(key).or_default();
            *usage.entry(point.reading_type.clone()).or_insert(0.0) += point.usage;
            days.insert(point.date);
        }

        map.into_iter()
            .map(|(month, (usage_by_type, days))| MonthlyPeriod {
                month,
                usage_by_type,
                days_observed: days.len() as u32,
            })
            .collect()
    }

    /// Linearly extrapolate net usage over the whole observed window to a
    /// 365-day year.
    ///
    /// The window spans from the earliest to the latest reading across
    /// *all* types; each type's delta is taken between its own first and
    /// last reading. Returns `None` when the window spans zero days (a
    /// single day of data cannot be projected). Types with fewer than 2
    /// readings are left out of the map.
    pub fn annual_usage(readings: &[Reading]) -> Option<AnnualUsage> {
        let first = readings.iter().map(|r| r.date).min()?;
        let last = readings.iter().map(|r| r.date).max()?;
        let days_in_data = (last - first).num_days();
        if days_in_data == 0 {
            return None;
        }

        // Per type: value of the first and last reading, plus a count.
        // Input order is date-ascending, so first/last fall out directly.
        let mut spans: BTreeMap<&str, (f64, f64, usize)> = BTreeMap::new();
        for reading in readings {
            spans
                .entry(reading.reading_type.as_str())
                .and_modify(|(_, last_value, count)| {
                    *last_value = reading.value;
                    *count += 1;
                })
                .or_insert((reading.value, reading.value, 1));
        }

        let usage_by_type: UsageByType = spans
            .into_iter()
            .filter(|(_, (_, _, count))| *count >= 2)
            .map(|(reading_type, (first_value, last_value, _))| {
                let annual = (last_value - first_value) / days_in_data as f64 * 365.0;
                (reading_type.to_string(), annual)
            })
            .collect();

        Some(AnnualUsage {
            usage_by_type,
            days_in_data,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
