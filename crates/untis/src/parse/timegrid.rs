use super::{get_digits, get_i64, records, RawRecord};
use crate::types::{DayTime, TimeGrid, TimeSpan};
use serde_json::Value;

/// Parses a `getTimegridUnits` result.
///
/// Upstream numbers days 0 (Sunday) to 6 (Saturday) and only sends the days
/// that have a schedule. The grid is reordered Monday first; days without a
/// record stay `None`.
pub fn parse_time_grid(value: &Value) -> TimeGrid {
    let days: Vec<&RawRecord> = records(value).collect();
    let mut grid = TimeGrid::default();

    for upstream_day in 0..7 {
        let Some(record) = days
            .iter()
            .find(|day| get_i64(day, "day") == Some(upstream_day))
        else {
            continue;
        };

        let spans = records(record.get("timeUnits").unwrap_or(&Value::Null))
            .filter_map(parse_time_unit)
            .collect();

        grid.days[((upstream_day + 6) % 7) as usize] = Some(spans);
    }

    grid
}

fn parse_time_unit(unit: &RawRecord) -> Option<TimeSpan> {
    Some((day_time(unit, "startTime")?, day_time(unit, "endTime")?))
}

/// Splits a zero-padded `HHMM` value into hour and minute.
fn day_time(record: &RawRecord, key: &str) -> Option<DayTime> {
    let digits = format!("{:0>4}", get_digits(record, key)?);
    if digits.len() != 4 {
        return None;
    }
    DayTime::new(digits[..2].parse().ok()?, digits[2..].parse().ok()?)
}
