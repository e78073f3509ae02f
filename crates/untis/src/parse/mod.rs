//! Parsers from raw JSON-RPC results into domain entities.
//!
//! Upstream records are loosely typed: any optional field may be missing or
//! carry a number where a string is expected (dates and times are sent as
//! `20240115` / `800`). Every read goes through a checked accessor, and a
//! missing or mistyped field becomes `None` instead of an error.

mod period;
mod records;
mod timegrid;

pub use period::parse_periods;
pub use records::{
    parse_holidays, parse_klassen, parse_login, parse_rooms, parse_school_year,
    parse_school_years, parse_students, parse_subjects, parse_teachers,
};
pub use timegrid::parse_time_grid;

use crate::id::{ElementType, Id};
use chrono::NaiveDate;
use serde_json::{Map, Value};

/// One upstream object, iterable as `(key, value)` pairs.
pub type RawRecord = Map<String, Value>;

/// Iterates over the objects of a JSON array, skipping anything else.
pub(crate) fn records(value: &Value) -> impl Iterator<Item = &RawRecord> {
    value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

pub(crate) fn get_str(record: &RawRecord, key: &str) -> Option<String> {
    record.get(key).and_then(Value::as_str).map(str::to_string)
}

pub(crate) fn get_i64(record: &RawRecord, key: &str) -> Option<i64> {
    value_i64(record.get(key)?)
}

pub(crate) fn get_bool(record: &RawRecord, key: &str) -> Option<bool> {
    record.get(key).and_then(Value::as_bool)
}

fn value_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Returns a numeric or string field as its digit string.
pub(crate) fn get_digits(record: &RawRecord, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::Number(n) => n.as_u64().map(|n| n.to_string()),
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            Some(s.clone())
        }
        _ => None,
    }
}

/// Reads a `YYYYMMDD` date.
pub(crate) fn get_date(record: &RawRecord, key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&get_digits(record, key)?, "%Y%m%d").ok()
}

/// Reads a list of element references such as `[{"id": 3}, {"id": 7}]`.
pub(crate) fn get_ids(record: &RawRecord, key: &str, kind: ElementType) -> Vec<Id> {
    record
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|element| match element {
            Value::Object(obj) => obj.get("id").and_then(value_i64),
            other => value_i64(other),
        })
        .map(|id| Id::new(kind, id))
        .collect()
}

/// Formats a date the way the server expects it.
pub(crate) fn compact_date(date: NaiveDate) -> i64 {
    date.format("%Y%m%d")
        .to_string()
        .parse()
        .unwrap_or_default()
}
