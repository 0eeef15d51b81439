//! Conversion of raw archive fields into optional measurements.
//!
//! The DWD archive has no separate "missing" marker: a station that measured
//! nothing writes a reserved negative code (usually `-999`) into the same numeric
//! column. Every field read from the archive goes through [`parse_observed_value`]
//! so those codes never reach any arithmetic.

/// Values at or below this threshold are sentinel codes, not measurements.
pub const SENTINEL_THRESHOLD: f64 = -900.0;

/// Parses a raw archive field with the default [`SENTINEL_THRESHOLD`].
///
/// Returns `None` when the field is missing, is not a number, or holds a
/// sentinel code. Surrounding whitespace is ignored.
///
/// ```
/// use dwd_climate::parse_observed_value;
///
/// assert_eq!(parse_observed_value(Some("  12.3")), Some(12.3));
/// assert_eq!(parse_observed_value(Some("-999")), None);
/// assert_eq!(parse_observed_value(Some("n/a")), None);
/// assert_eq!(parse_observed_value(None), None);
/// ```
pub fn parse_observed_value(raw: Option<&str>) -> Option<f64> {
    parse_observed_value_with_threshold(raw, SENTINEL_THRESHOLD)
}

pub fn parse_observed_value_with_threshold(raw: Option<&str>, threshold: f64) -> Option<f64> {
    let value: f64 = raw?.trim().parse().ok()?;
    if value.is_nan() || value <= threshold {
        return None;
    }
    Some(value)
}
