//! Lenient scalar normalisation.
//!
//! Report generators emit boolean-like fields either as JSON booleans or as the
//! string literals `"true"` / `"false"`. [`parse_bool`] is the only place that
//! decides what counts as true; the serde helper below routes every flag field
//! through it at ingestion time so the rest of the crate sees plain `bool`s.
//!
//! Metric fields get the same treatment: a `null`, negative or non-numeric
//! metric reads as 0 instead of failing the whole document.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Interpret a boolean-like JSON value.
///
/// Native `true` and the string `"true"` are true. Everything else, including
/// `"TRUE"`, `1` and `null`, is false.
pub fn parse_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s == "true",
        _ => false,
    }
}

/// Serde adapter for flag fields (`#[serde(deserialize_with = "flag")]`).
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(parse_bool).unwrap_or(false))
}

/// Serde adapter that treats an explicit `null` like a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Interpret a count-like JSON value. Integral floats such as `12.0` are
/// accepted; fractions round to the nearest count.
pub fn parse_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f > 0.0)
                .map_or(0, |f| f.round() as u64)
        }),
        _ => 0,
    }
}

/// Serde adapter for count fields (`#[serde(deserialize_with = "count")]`).
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(parse_count).unwrap_or(0))
}

/// Serde adapter for fractional metrics; anything but a finite number is 0.
pub fn metric<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_f64)
        .filter(|f| f.is_finite())
        .unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_native_and_string_true_agree() {
        assert!(parse_bool(&json!(true)));
        assert!(parse_bool(&json!("true")));
        assert_eq!(parse_bool(&json!(true)), parse_bool(&json!("true")));
    }

    #[test]
    fn test_everything_else_is_false() {
        assert!(!parse_bool(&json!(false)));
        assert!(!parse_bool(&json!("false")));
        assert!(!parse_bool(&json!("TRUE")));
        assert!(!parse_bool(&json!(1)));
        assert!(!parse_bool(&Value::Null));
    }

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "flag")]
        on: bool,
    }

    #[test]
    fn test_flag_adapter() {
        let a: Probe = serde_json::from_str(r#"{"on": "true"}"#).unwrap();
        let b: Probe = serde_json::from_str(r#"{"on": true}"#).unwrap();
        let c: Probe = serde_json::from_str(r#"{"on": null}"#).unwrap();
        let d: Probe = serde_json::from_str("{}").unwrap();
        assert!(a.on && b.on);
        assert!(!c.on && !d.on);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(&json!(7)), 7);
        assert_eq!(parse_count(&json!(12.0)), 12);
        assert_eq!(parse_count(&json!(2.6)), 3);
        assert_eq!(parse_count(&json!(-4)), 0);
        assert_eq!(parse_count(&json!("7")), 0);
        assert_eq!(parse_count(&Value::Null), 0);
    }

    #[derive(Deserialize)]
    struct Metrics {
        #[serde(default, deserialize_with = "count")]
        lines: u64,
        #[serde(default, deserialize_with = "metric")]
        ratio: f64,
    }

    #[test]
    fn test_metric_adapters_never_fail() {
        let nulls: Metrics = serde_json::from_str(r#"{"lines": null, "ratio": null}"#).unwrap();
        assert_eq!((nulls.lines, nulls.ratio), (0, 0.0));

        let odd: Metrics = serde_json::from_str(r#"{"lines": 40.0, "ratio": "n/a"}"#).unwrap();
        assert_eq!((odd.lines, odd.ratio), (40, 0.0));

        let missing: Metrics = serde_json::from_str("{}").unwrap();
        assert_eq!((missing.lines, missing.ratio), (0, 0.0));
    }
}
