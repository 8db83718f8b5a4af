//! CSV ingestion for Meter Monitor.
//!
//! Reads meter-reading export files and converts them into sorted
//! [`Reading`] records for downstream processing. Unlike log-style inputs
//! where bad lines can be skipped, a billing file with any malformed row is
//! rejected whole: partially loaded readings would silently skew every
//! derived figure.

use std::io;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use meter_core::error::{MeterError, Result};
use meter_core::models::{Reading, DEFAULT_SOURCE};

/// Expected date format in the input file, e.g. `17/12/2024`.
const DATE_FORMAT: &str = "%d/%m/%Y";

/// One row of the input file, before type conversion.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Type")]
    reading_type: String,
    #[serde(rename = "Reading")]
    reading: String,
    #[serde(rename = "Reading Source", default)]
    source: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and parse the readings CSV at `path`.
///
/// Returns the readings sorted ascending by date. Same-date rows keep their
/// input order (the sort is stable), so duplicate same-day readings stay in
/// first-encountered order.
pub fn load_readings(path: &Path) -> Result<Vec<Reading>> {
    let file = std::fs::File::open(path).map_err(|source| MeterError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let readings = read_readings(file)?;
    info!(
        "Loaded {} readings from {}",
        readings.len(),
        path.display()
    );
    Ok(readings)
}

/// Parse readings from any byte source.
///
/// Split out from [`load_readings`] so tests can feed CSV text directly.
pub fn read_readings<R: io::Read>(input: R) -> Result<Vec<Reading>> {
    let mut csv_reader = csv::Reader::from_reader(input);

    let mut readings: Vec<Reading> = Vec::new();
    for row in csv_reader.deserialize() {
        let raw: RawRecord = row?;
        readings.push(parse_record(raw)?);
    }

    readings.sort_by_key(|r| r.date);
    Ok(readings)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Convert one raw row into a typed [`Reading`].
fn parse_record(raw: RawRecord) -> Result<Reading> {
    Ok(Reading {
        date: parse_date(&raw.date)?,
        reading_type: raw.reading_type.trim().to_string(),
        value: parse_reading_value(&raw.reading)?,
        source: resolve_source(raw.source.as_deref()),
    })
}

/// Parse a `DD/MM/YYYY` date string.
fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| MeterError::DateParse(text.to_string()))
}

/// Parse a meter value that may carry thousands-separator commas and
/// surrounding whitespace, e.g. `" 66,444 "`.
fn parse_reading_value(text: &str) -> Result<f64> {
    let cleaned = text.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(MeterError::ReadingParse(text.to_string()));
    }
    cleaned
        .parse::<f64>()
        .map_err(|_| MeterError::ReadingParse(text.to_string()))
}

/// Absent or blank source values default to `"manual"`.
fn resolve_source(source: Option<&str>) -> String {
    match source {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => DEFAULT_SOURCE.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── parse_reading_value ───────────────────────────────────────────────

    #[test]
    fn test_parse_reading_value_with_commas_and_whitespace() {
        let value = parse_reading_value(" 66,444 ").unwrap();
        assert_eq!(value, 66_444.0);
    }

    #[test]
    fn test_parse_reading_value_plain() {
        assert_eq!(parse_reading_value("1234.5").unwrap(), 1_234.5);
    }

    #[test]
    fn test_parse_reading_value_rejects_non_numeric_residue() {
        let err = parse_reading_value("66,4x4").unwrap_err();
        assert!(matches!(err, MeterError::ReadingParse(_)));
    }

    #[test]
    fn test_parse_reading_value_rejects_empty() {
        assert!(parse_reading_value("   ").is_err());
    }

    // ── parse_date ────────────────────────────────────────────────────────

    #[test]
    fn test_parse_date_day_month_year() {
        assert_eq!(parse_date("17/12/2024").unwrap(), date(2024, 12, 17));
    }

    #[test]
    fn test_parse_date_rejects_iso_format() {
        let err = parse_date("2024-12-17").unwrap_err();
        assert!(matches!(err, MeterError::DateParse(_)));
    }

    #[test]
    fn test_parse_date_rejects_month_day_order() {
        // 13 as a month is impossible, so a US-ordered 12/17/2024 must fail.
        assert!(parse_date("12/17/2024").is_err());
    }

    // ── read_readings ─────────────────────────────────────────────────────

    #[test]
    fn test_read_readings_basic() {
        let csv_text = "\
Date,Type,Reading,Reading Source
17/12/2024,anytime,\" 66,444 \",bill
17/12/2024,controlled load,\" 79,636 \",bill
17/12/2024,solar,\" 70,660 \",bill
";
        let readings = read_readings(csv_text.as_bytes()).unwrap();
        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].date, date(2024, 12, 17));
        assert_eq!(readings[0].reading_type, "anytime");
        assert_eq!(readings[0].value, 66_444.0);
        assert_eq!(readings[0].source, "bill");
        assert_eq!(readings[1].value, 79_636.0);
        assert_eq!(readings[2].reading_type, "solar");
    }

    #[test]
    fn test_read_readings_missing_source_defaults_to_manual() {
        let csv_text = "\
Date,Type,Reading,Reading Source
05/01/2025,anytime,67000,
";
        let readings = read_readings(csv_text.as_bytes()).unwrap();
        assert_eq!(readings[0].source, "manual");
    }

    #[test]
    fn test_read_readings_without_source_column() {
        let csv_text = "\
Date,Type,Reading
05/01/2025,anytime,67000
";
        let readings = read_readings(csv_text.as_bytes()).unwrap();
        assert_eq!(readings[0].source, "manual");
    }

    #[test]
    fn test_read_readings_sorted_by_date() {
        let csv_text = "\
Date,Type,Reading,Reading Source
05/01/2025,anytime,67000,manual
17/12/2024,anytime,66444,bill
";
        let readings = read_readings(csv_text.as_bytes()).unwrap();
        assert_eq!(readings[0].date, date(2024, 12, 17));
        assert_eq!(readings[1].date, date(2025, 1, 5));
    }

    #[test]
    fn test_read_readings_same_date_keeps_input_order() {
        let csv_text = "\
Date,Type,Reading,Reading Source
17/12/2024,anytime,100,manual
17/12/2024,anytime,105,bill
";
        let readings = read_readings(csv_text.as_bytes()).unwrap();
        assert_eq!(readings[0].value, 100.0);
        assert_eq!(readings[1].value, 105.0);
    }

    #[test]
    fn test_read_readings_bad_date_aborts_whole_file() {
        let csv_text = "\
Date,Type,Reading,Reading Source
17/12/2024,anytime,66444,bill
2025-01-05,anytime,67000,manual
";
        let err = read_readings(csv_text.as_bytes()).unwrap_err();
        assert!(matches!(err, MeterError::DateParse(_)));
    }

    #[test]
    fn test_read_readings_bad_value_aborts_whole_file() {
        let csv_text = "\
Date,Type,Reading,Reading Source
17/12/2024,anytime,66444,bill
05/01/2025,anytime,sixty-seven,manual
";
        let err = read_readings(csv_text.as_bytes()).unwrap_err();
        assert!(matches!(err, MeterError::ReadingParse(_)));
    }

    #[test]
    fn test_read_readings_empty_file() {
        let readings = read_readings("Date,Type,Reading,Reading Source\n".as_bytes()).unwrap();
        assert!(readings.is_empty());
    }

    // ── load_readings ─────────────────────────────────────────────────────

    #[test]
    fn test_load_readings_from_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("readings.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Date,Type,Reading,Reading Source").unwrap();
        writeln!(file, "01/01/2024,anytime,1000,bill").unwrap();
        writeln!(file, "31/01/2024,anytime,1300,bill").unwrap();

        let readings = load_readings(&path).unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[1].value, 1_300.0);
    }

    #[test]
    fn test_load_readings_missing_file() {
        let err = load_readings(Path::new("/tmp/does-not-exist-meter-test.csv")).unwrap_err();
        assert!(matches!(err, MeterError::FileRead { .. }));
    }
}
