//! Tolerant field readers shared by every record kind
//!
//! Each reader walks the aliases for a field in priority order and returns
//! the first value it can use. Wrong types count as absent.

use regex::Regex;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::sync::LazyLock;

use super::aliases::{Field, keys};
use crate::models::GeoCoordinates;
use crate::models::budget::{format_amount, parse_amount};

pub type Object = Map<String, Value>;

/// Present, non-null values for `field` in alias order
pub fn candidates<'a>(obj: &'a Object, field: Field) -> impl Iterator<Item = &'a Value> {
    keys(field)
        .iter()
        .filter_map(move |key| obj.get(*key))
        .filter(|v| !v.is_null())
}

/// First object value stored under `field`
pub fn object<'a>(obj: &'a Object, field: Field) -> Option<&'a Object> {
    candidates(obj, field).find_map(Value::as_object)
}

/// First array value stored under `field`
pub fn array<'a>(obj: &'a Object, field: Field) -> Option<&'a Vec<Value>> {
    candidates(obj, field).find_map(Value::as_array)
}

/// Scalar rendered as text; objects, arrays and blank strings are unusable
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.as_f64().map_or_else(|| n.to_string(), format_amount)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Text for `field`, or `""`
pub fn text(obj: &Object, field: Field) -> String {
    optional_text(obj, field).unwrap_or_default()
}

pub fn optional_text(obj: &Object, field: Field) -> Option<String> {
    candidates(obj, field).find_map(scalar_text)
}

/// Price text: strings pass through trimmed, numbers gain a currency suffix
pub fn price(obj: &Object, field: Field, currency: &str) -> Option<String> {
    candidates(obj, field).find_map(|value| match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .map(|v| format!("{} {currency}", format_amount(v))),
        _ => None,
    })
}

/// Numeric value from a number or a currency-decorated string
pub fn amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_amount(s),
        _ => None,
    }
}

pub fn number(obj: &Object, field: Field) -> Option<f64> {
    candidates(obj, field).find_map(amount)
}

fn coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn flat_geo(obj: &Object) -> Option<GeoCoordinates> {
    let latitude = candidates(obj, Field::Latitude).find_map(coordinate)?;
    let longitude = candidates(obj, Field::Longitude).find_map(coordinate)?;
    GeoCoordinates::new(latitude, longitude)
}

/// Coordinates from a nested object, a `"lat, lng"` string, a `[lat, lng]`
/// pair, or flat latitude/longitude keys on the record itself
pub fn geo(obj: &Object) -> Option<GeoCoordinates> {
    candidates(obj, Field::GeoCoordinates)
        .find_map(|value| match value {
            Value::Object(nested) => flat_geo(nested),
            Value::String(s) => GeoCoordinates::parse_pair(s),
            Value::Array(pair) if pair.len() == 2 => {
                GeoCoordinates::new(coordinate(&pair[0])?, coordinate(&pair[1])?)
            }
            _ => None,
        })
        .or_else(|| flat_geo(obj))
}

/// String items of a list; numbers are stringified, anything else dropped.
/// Absent or non-array values give an empty list.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|v| v.is_string() || v.is_number())
                .filter_map(scalar_text)
                .collect()
        })
        .unwrap_or_default()
}

static DAY_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("day number pattern is valid"));

/// First integer in a day key such as `"Day 12"` or `"day_3"`
pub fn day_number(key: &str) -> Option<u64> {
    DAY_NUMBER.find(key)?.as_str().parse().ok()
}

/// Numbered keys ascending, then unnumbered keys lexicographically
pub fn day_order(a: &str, b: &str) -> Ordering {
    match (day_number(a), day_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
