use super::{get_digits, get_i64, get_ids, get_str, records, RawRecord};
use crate::id::ElementType;
use crate::types::{Period, DEFAULT_LESSON_TYPE};
use chrono::NaiveDateTime;
use serde_json::Value;

const CANCELLED_CODE: &str = "cancelled";

/// Parses a `getTimetable` result.
pub fn parse_periods(value: &Value) -> Vec<Period> {
    records(value).map(parse_period).collect()
}

fn parse_period(record: &RawRecord) -> Period {
    let date = get_digits(record, "date");
    let timestamp = |key: &str| {
        let date = date.as_deref()?;
        let time = get_digits(record, key)?;
        NaiveDateTime::parse_from_str(&format!("{date}{time:0>4}"), "%Y%m%d%H%M").ok()
    };
    let code = get_str(record, "code");

    Period {
        id: get_i64(record, "id").unwrap_or_default(),
        start_time: timestamp("startTime"),
        end_time: timestamp("endTime"),
        classes: get_ids(record, "kl", ElementType::Klasse),
        teachers: get_ids(record, "te", ElementType::Teacher),
        subjects: get_ids(record, "su", ElementType::Subject),
        rooms: get_ids(record, "ro", ElementType::Room),
        is_cancelled: code.as_deref() == Some(CANCELLED_CODE),
        activity_type: get_str(record, "activityType"),
        code,
        lesson_type: get_str(record, "lstype").unwrap_or_else(|| DEFAULT_LESSON_TYPE.to_string()),
        lesson_text: get_str(record, "lstext"),
        status_flags: get_str(record, "statflags"),
    }
}
