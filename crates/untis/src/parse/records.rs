use super::{get_bool, get_date, get_i64, get_str, records, RawRecord};
use crate::error::{Result, UntisError};
use crate::id::{ElementType, Id};
use crate::rpc::SessionToken;
use crate::types::{Holiday, Klasse, LoginInfo, Room, SchoolYear, Student, Subject, Teacher};
use serde_json::Value;

/// Klassen carry their teachers as `teacher1`, `teacher2`, ... fields.
const TEACHER_KEY_PREFIX: &str = "teacher";

fn element_id(record: &RawRecord, kind: ElementType) -> Id {
    Id::new(kind, get_i64(record, "id").unwrap_or_default())
}

pub fn parse_subjects(value: &Value) -> Vec<Subject> {
    records(value)
        .map(|r| Subject {
            id: element_id(r, ElementType::Subject),
            name: get_str(r, "name"),
            long_name: get_str(r, "longName"),
            alternate_name: get_str(r, "alternateName"),
            fore_color: get_str(r, "foreColor"),
            back_color: get_str(r, "backColor"),
        })
        .collect()
}

pub fn parse_students(value: &Value) -> Vec<Student> {
    records(value)
        .map(|r| Student {
            id: element_id(r, ElementType::Student),
            key: get_str(r, "key"),
            name: get_str(r, "name"),
            forename: get_str(r, "foreName"),
            long_name: get_str(r, "longName"),
            gender: get_str(r, "gender"),
        })
        .collect()
}

pub fn parse_teachers(value: &Value) -> Vec<Teacher> {
    records(value)
        .map(|r| Teacher {
            id: element_id(r, ElementType::Teacher),
            name: get_str(r, "name"),
            forename: get_str(r, "foreName"),
            long_name: get_str(r, "longName"),
            fore_color: get_str(r, "foreColor"),
            back_color: get_str(r, "backColor"),
        })
        .collect()
}

pub fn parse_rooms(value: &Value) -> Vec<Room> {
    records(value)
        .map(|r| Room {
            id: element_id(r, ElementType::Room),
            name: get_str(r, "name"),
            long_name: get_str(r, "longName"),
            building: get_str(r, "building"),
            active: get_bool(r, "active"),
            fore_color: get_str(r, "foreColor"),
            back_color: get_str(r, "backColor"),
        })
        .collect()
}

pub fn parse_klassen(value: &Value) -> Vec<Klasse> {
    records(value).map(parse_klasse).collect()
}

fn parse_klasse(record: &RawRecord) -> Klasse {
    let teachers = record
        .iter()
        .filter(|(key, _)| key.starts_with(TEACHER_KEY_PREFIX))
        .filter_map(|(key, _)| get_i64(record, key))
        .map(Id::teacher)
        .collect();

    Klasse {
        id: element_id(record, ElementType::Klasse),
        name: get_str(record, "name"),
        long_name: get_str(record, "longName"),
        department_id: get_i64(record, "did"),
        fore_color: get_str(record, "foreColor"),
        back_color: get_str(record, "backColor"),
        teachers,
    }
}

fn school_year(record: &RawRecord) -> SchoolYear {
    SchoolYear {
        id: get_i64(record, "id").unwrap_or_default(),
        name: get_str(record, "name"),
        start_date: get_date(record, "startDate"),
        end_date: get_date(record, "endDate"),
    }
}

pub fn parse_school_years(value: &Value) -> Vec<SchoolYear> {
    records(value).map(school_year).collect()
}

/// Parses `getCurrentSchoolyear`, which answers with a single object or null.
pub fn parse_school_year(value: &Value) -> Option<SchoolYear> {
    value.as_object().map(school_year)
}

pub fn parse_holidays(value: &Value) -> Vec<Holiday> {
    records(value)
        .map(|r| Holiday {
            id: get_i64(r, "id").unwrap_or_default(),
            name: get_str(r, "name"),
            long_name: get_str(r, "longName"),
            start_date: get_date(r, "startDate"),
            end_date: get_date(r, "endDate"),
        })
        .collect()
}

/// Parses an `authenticate` result into the session token and identity.
///
/// The token is the only required field.
pub fn parse_login(value: &Value) -> Result<(SessionToken, LoginInfo)> {
    let record = value.as_object().ok_or_else(|| UntisError::Parse {
        message: "authenticate result is not an object".to_string(),
    })?;
    let token = get_str(record, "sessionId").ok_or_else(|| UntisError::Parse {
        message: "authenticate result has no sessionId".to_string(),
    })?;

    let person = match (get_i64(record, "personType"), get_i64(record, "personId")) {
        (Some(code), Some(id)) if id > 0 => ElementType::from_code(code).map(|kind| Id::new(kind, id)),
        _ => None,
    };
    let klasse = get_i64(record, "klasseId")
        .filter(|id| *id > 0)
        .map(Id::klasse);

    Ok((SessionToken::new(token), LoginInfo { person, klasse }))
}
