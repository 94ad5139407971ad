//! Shared parsing utilities for Socrata records.
//!
//! Date and coordinate parsing used when normalizing raw case records.

use chrono::NaiveDateTime;

/// Parses a Socrata floating timestamp (ISO 8601 with optional fractional
/// seconds, no zone).
#[must_use]
pub fn parse_socrata_date(s: &str) -> Option<NaiveDateTime> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive);
    }
    None
}

/// Parses lat/lng from optional string fields. Returns `None` if missing,
/// unparseable, non-finite, or zero.
#[must_use]
pub fn parse_lat_lng_str(lat: Option<&str>, lng: Option<&str>) -> Option<(f64, f64)> {
    let latitude = lat?.trim().parse::<f64>().ok()?;
    let longitude = lng?.trim().parse::<f64>().ok()?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }
    if latitude == 0.0 || longitude == 0.0 {
        return None;
    }
    Some((latitude, longitude))
}

/// Reads a boolean feature property. Socrata `GeoJSON` exports sometimes
/// serialize checkbox columns as `"true"`/`"false"` strings.
#[must_use]
pub fn parse_bool_property(value: Option<&serde_json::Value>) -> Option<bool> {
    match value? {
        serde_json::Value::Bool(b) => Some(*b),
        serde_json::Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "1" => Some(true),
            "false" | "f" | "0" => Some(false),
            _ => None,
        },
        serde_json::Value::Number(n) => n.as_i64().map(|v| v != 0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_socrata_date_with_fractional() {
        let dt = parse_socrata_date("2020-03-15T10:00:00.000").unwrap();
        assert_eq!(dt.to_string(), "2020-03-15 10:00:00");
    }

    #[test]
    fn parses_socrata_date_without_fractional() {
        let dt = parse_socrata_date("2020-03-15T10:00:00").unwrap();
        assert_eq!(dt.to_string(), "2020-03-15 10:00:00");
    }

    #[test]
    fn rejects_invalid_date() {
        assert!(parse_socrata_date("not-a-date").is_none());
    }

    #[test]
    fn parses_lat_lng_strings() {
        let (la, lo) = parse_lat_lng_str(Some("37.7749"), Some("-122.4194")).unwrap();
        assert!((la - 37.7749).abs() < f64::EPSILON);
        assert!((lo - -122.4194).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_zero_lat_lng() {
        assert!(parse_lat_lng_str(Some("0.0"), Some("-122.4194")).is_none());
    }

    #[test]
    fn rejects_missing_or_non_finite_lat_lng() {
        assert!(parse_lat_lng_str(None, Some("-122.4194")).is_none());
        assert!(parse_lat_lng_str(Some("NaN"), Some("-122.4194")).is_none());
        assert!(parse_lat_lng_str(Some("37.7"), Some("inf")).is_none());
    }

    #[test]
    fn parses_bool_properties() {
        assert_eq!(
            parse_bool_property(Some(&serde_json::json!(true))),
            Some(true)
        );
        assert_eq!(
            parse_bool_property(Some(&serde_json::json!("false"))),
            Some(false)
        );
        assert_eq!(parse_bool_property(Some(&serde_json::json!(1))), Some(true));
        assert_eq!(parse_bool_property(Some(&serde_json::json!("maybe"))), None);
        assert_eq!(parse_bool_property(None), None);
    }
}
