use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Provenance tag assumed when a row carries no `Reading Source` value.
pub const DEFAULT_SOURCE: &str = "manual";

/// A single observed meter value read from the input file.
///
/// `value` is cumulative: well-formed data is monotonically non-decreasing
/// within one `reading_type`, though this is assumed rather than enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Calendar date of the observation (no time component).
    pub date: NaiveDate,
    /// Category of the reading, e.g. `"anytime"`, `"controlled load"`,
    /// `"solar"`. An open set: new categories may appear in input data.
    pub reading_type: String,
    /// Cumulative meter value in kWh.
    pub value: f64,
    /// Where the value came from (`"bill"`, `"manual"`, ...).
    pub source: String,
}

/// Derived average daily usage for one calendar day of one reading type.
///
/// One point exists for every day between a type's first and last reading,
/// exclusive of the final boundary date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyUsagePoint {
    /// The day this point covers.
    pub date: NaiveDate,
    /// Category the usage belongs to.
    pub reading_type: String,
    /// Average kWh per day over the reading interval containing `date`.
    pub usage: f64,
}

/// Canonicalise a free-text reading category for map lookups.
///
/// Trims surrounding whitespace, lowercases, and collapses internal runs of
/// whitespace to a single space, so `" Controlled  Load "` and
/// `"controlled load"` resolve to the same key. Unknown categories pass
/// through (normalised) rather than being rejected.
///
/// # Examples
///
/// ```
/// use meter_core::models::normalize_reading_type;
///
/// assert_eq!(normalize_reading_type("Anytime"), "anytime");
/// assert_eq!(normalize_reading_type(" Controlled  Load "), "controlled load");
/// assert_eq!(normalize_reading_type("off-peak pool pump"), "off-peak pool pump");
/// ```
pub fn normalize_reading_type(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
