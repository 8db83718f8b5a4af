//! Flat-rate interpolation of sparse cumulative readings into daily usage.
//!
//! Meter readings arrive monthly or per billing cycle; charts and monthly
//! rollups need a continuous daily signal. Each reading pair's value delta
//! is spread evenly across every day of its span, which approximates daily
//! behaviour rather than measuring it.

use std::collections::BTreeMap;

use chrono::Duration;

use meter_core::models::{DailyUsagePoint, Reading};

/// Stateless converter from sorted readings to a dense daily-usage series.
pub struct UsageInterpolator;

impl UsageInterpolator {
    /// Derive daily usage points for every reading type in `readings`.
    ///
    /// Input must be sorted ascending by date (the parser guarantees it).
    /// For each consecutive pair of one type, a point is produced for every
    /// day in `[prev.date, next.date)` carrying the pair's average daily
    /// usage. A type with fewer than 2 readings produces no points.
    ///
    /// Output is grouped by type (alphabetical) and ordered by date within
    /// each type.
    pub fn daily_usage(readings: &[Reading]) -> Vec<DailyUsagePoint> {
        let mut by_type: BTreeMap<&str, Vec<&Reading>> = BTreeMap::new();
        for reading in readings {
            by_type
                .entry(reading.reading_type.as_str())
                .or_default()
                .push(reading);
        }

        let mut points = Vec::new();
        for series in by_type.values() {
            Self::interpolate_series(series, &mut points);
        }
        points
    }

    /// Spread each consecutive pair's delta across the days of its span.
    ///
    /// A zero-day span (two same-day readings) contributes nothing and
    /// never reaches the division: there are no days in `[d, d)`.
    fn interpolate_series(series: &[&Reading], out: &mut Vec<DailyUsagePoint>) {
        for pair in series.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            let span_days = (next.date - prev.date).num_days();
            if span_days <= 0 {
                continue;
            }

            let per_day = (next.value - prev.value) / span_days as f64;
            for offset in 0..span_days {
                out.push(DailyUsagePoint {
                    date: prev.date + Duration::days(offset),
                    reading_type: prev.reading_type.clone(),
                    usage: per_day,
                });
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
