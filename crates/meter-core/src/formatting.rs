use chrono::NaiveDate;

/// Format a floating-point number with thousands separators and a fixed
/// number of decimal places.
///
/// # Examples
///
/// ```
/// use meter_core::formatting::format_number;
///
/// assert_eq!(format_number(66444.0, 0), "66,444");
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// ```
pub fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

/// Format a dollar amount with two decimal places and thousands separators.
///
/// # Examples
///
/// ```
/// use meter_core::formatting::format_currency;
///
/// assert_eq!(format_currency(1234.56), "$1,234.56");
/// assert_eq!(format_currency(-9.99), "$-9.99");
/// ```
pub fn format_currency(amount: f64) -> String {
    format!("${}", format_number(amount, 2))
}

/// Format an energy quantity as kWh.
///
/// # Examples
///
/// ```
/// use meter_core::formatting::format_kwh;
///
/// assert_eq!(format_kwh(3842.0, 0), "3,842 kWh");
/// assert_eq!(format_kwh(9.75, 2), "9.75 kWh");
/// ```
pub fn format_kwh(kwh: f64, decimals: usize) -> String {
    format!("{} kWh", format_number(kwh, decimals))
}

/// Format a calendar date as `DD Mon YYYY`, the style used in the data
/// summary banner.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use meter_core::formatting::format_date;
///
/// let date = NaiveDate::from_ymd_opt(2024, 12, 17).unwrap();
/// assert_eq!(format_date(date), "17 Dec 2024");
/// ```
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` when `whole` is zero to avoid division by zero.
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let factor = 10_f64.powi(decimal_places as i32);
    (part / whole * 100.0 * factor).round() / factor
}

// ── Tests ─────────────────────────────────────────────────────────────────────
