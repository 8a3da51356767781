//! Latitude/longitude parameter validation.
//!
//! Request parameters arrive as strings, JSON numbers or not at all. Every
//! shape is funnelled through [`RawValue`] before being parsed, so the same
//! rules apply no matter where the coordinates came from.

use crate::{GeoError, GeoPoint, Result};

/// An unparsed coordinate component as received from a request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    /// Parameter was not supplied (or was JSON `null`)
    Missing,
    /// Parameter was supplied as text
    Text(&'a str),
    /// Parameter was supplied as a number
    Number(f64),
}

impl RawValue<'_> {
    /// Returns true if the parameter was not supplied.
    pub fn is_missing(&self) -> bool {
        matches!(self, RawValue::Missing)
    }

    /// Parses the value as a finite `f64`.
    ///
    /// Returns `None` for missing, empty, non-numeric, NaN or infinite input.
    pub fn parse_finite(&self) -> Option<f64> {
        let value = match *self {
            RawValue::Missing => return None,
            RawValue::Number(n) => n,
            RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(value: &'a str) -> Self {
        RawValue::Text(value)
    }
}

impl<'a> From<Option<&'a str>> for RawValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(RawValue::Missing, RawValue::Text)
    }
}

impl From<f64> for RawValue<'_> {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<Option<f64>> for RawValue<'_> {
    fn from(value: Option<f64>) -> Self {
        value.map_or(RawValue::Missing, RawValue::Number)
    }
}

impl<'a> From<&'a serde_json::Value> for RawValue<'a> {
    fn from(value: &'a serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => n.as_f64().map_or(RawValue::Missing, RawValue::Number),
            serde_json::Value::String(s) => RawValue::Text(s),
            // Objects, arrays and booleans can never be a coordinate; the parse
            // step turns this into an invalid (not missing) value.
            serde_json::Value::Bool(_)
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => RawValue::Text(""),
            serde_json::Value::Null => RawValue::Missing,
        }
    }
}

impl<'a> From<Option<&'a serde_json::Value>> for RawValue<'a> {
    fn from(value: Option<&'a serde_json::Value>) -> Self {
        value.map_or(RawValue::Missing, RawValue::from)
    }
}

/// Validates a latitude/longitude pair that the caller requires.
///
/// Fails with [`GeoError::InvalidCoordinates`] when either component is
/// missing, not a finite number, or out of range.
///
/// # Example
/// ```
/// use pulperia_geo::validate;
///
/// let point = validate("14.0818", "-87.2068").unwrap();
/// assert_eq!(point.latitude, 14.0818);
///
/// assert!(validate("14.0818", "west").is_err());
/// assert!(validate(None::<&str>, "-87.2068").is_err());
/// ```
pub fn validate<'a, 'b>(
    raw_lat: impl Into<RawValue<'a>>,
    raw_lng: impl Into<RawValue<'b>>,
) -> Result<GeoPoint> {
    let raw_lat = raw_lat.into();
    let raw_lng = raw_lng.into();

    if raw_lat.is_missing() || raw_lng.is_missing() {
        return Err(GeoError::InvalidCoordinates(
            "both latitude and longitude are required".into(),
        ));
    }

    let latitude = parse_component("latitude", &raw_lat, 90.0)?;
    let longitude = parse_component("longitude", &raw_lng, 180.0)?;

    Ok(GeoPoint::new(latitude, longitude))
}

/// Validates an optional latitude/longitude pair.
///
/// Both missing means no geo filter was requested and yields `Ok(None)`.
/// Exactly one missing is an error, as is any malformed component.
pub fn validate_optional<'a, 'b>(
    raw_lat: impl Into<RawValue<'a>>,
    raw_lng: impl Into<RawValue<'b>>,
) -> Result<Option<GeoPoint>> {
    let raw_lat = raw_lat.into();
    let raw_lng = raw_lng.into();

    if raw_lat.is_missing() && raw_lng.is_missing() {
        return Ok(None);
    }

    validate(raw_lat, raw_lng).map(Some)
}

fn parse_component(name: &str, raw: &RawValue<'_>, bound: f64) -> Result<f64> {
    let value = raw.parse_finite().ok_or_else(|| {
        GeoError::InvalidCoordinates(format!("{name} is not a number: {}", describe(raw)))
    })?;

    if !(-bound..=bound).contains(&value) {
        return Err(GeoError::InvalidCoordinates(format!(
            "{name} {value} is outside [-{bound}, {bound}]"
        )));
    }

    Ok(value)
}

fn describe(raw: &RawValue<'_>) -> String {
    match raw {
        RawValue::Missing => "<missing>".to_string(),
        RawValue::Text(s) => format!("{s:?}"),
        RawValue::Number(n) => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_strings() {
        let point = validate("14.0818", "-87.2068").unwrap();
        assert_eq!(point, GeoPoint::new(14.0818, -87.2068));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let point = validate(" 14.0818 ", "\t-87.2068").unwrap();
        assert_eq!(point.longitude, -87.2068);
    }

    #[test]
    fn test_numbers() {
        let point = validate(14.5, -87.0).unwrap();
        assert_eq!(point, GeoPoint::new(14.5, -87.0));
    }

    #[test]
    fn test_missing_component_is_invalid() {
        let err = validate(Some("14.0"), None::<&str>).unwrap_err();
        assert!(matches!(err, GeoError::InvalidCoordinates(_)));
    }

    #[test]
    fn test_nan_is_invalid() {
        assert!(validate("NaN", "-87.0").is_err());
        assert!(validate(f64::NAN, -87.0).is_err());
        assert!(validate("14.0", "inf").is_err());
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(validate("", "-87.0").is_err());
        assert!(validate("14.0abc", "-87.0").is_err());
        assert!(validate("norte", "oeste").is_err());
    }

    #[test]
    fn test_out_of_range_is_invalid() {
        assert!(validate("90.0001", "0").is_err());
        assert!(validate("0", "-180.5").is_err());
        assert!(validate("-90", "180").is_ok());
    }

    #[test]
    fn test_optional_both_missing() {
        assert_eq!(validate_optional(None::<&str>, None::<&str>).unwrap(), None);
    }

    #[test]
    fn test_optional_one_missing() {
        assert!(validate_optional(None::<&str>, Some("-87.2")).is_err());
        assert!(validate_optional(Some("14.1"), None::<&str>).is_err());
    }

    #[test]
    fn test_optional_present() {
        let point = validate_optional(Some("14.1"), Some("-87.2")).unwrap();
        assert_eq!(point, Some(GeoPoint::new(14.1, -87.2)));
    }

    #[test]
    fn test_json_values() {
        let lat = json!(14.0818);
        let lng = json!("-87.2068");
        let point = validate(&lat, &lng).unwrap();
        assert_eq!(point, GeoPoint::new(14.0818, -87.2068));

        let null = json!(null);
        assert_eq!(validate_optional(&null, &null).unwrap(), None);

        let obj = json!({"lat": 1});
        assert!(validate(&obj, &lng).is_err());
    }
}
