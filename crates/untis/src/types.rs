/// Domain entities returned by a WebUntis session
use crate::id::Id;
use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

/// Lesson type assumed when the server omits `lstype`.
pub const DEFAULT_LESSON_TYPE: &str = "ls";

/// A single timetable slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub id: i64,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub classes: Vec<Id>,
    pub teachers: Vec<Id>,
    pub subjects: Vec<Id>,
    pub rooms: Vec<Id>,
    /// True iff `code` is exactly "cancelled"
    pub is_cancelled: bool,
    pub activity_type: Option<String>,
    /// "cancelled", "irregular" or absent
    pub code: Option<String>,
    /// "ls" (lesson), "oh" (office hour), "sb" (standby), "bs" (break supervision), "ex" (exam)
    pub lesson_type: String,
    pub lesson_text: Option<String>,
    pub status_flags: Option<String>,
}

impl Period {
    /// Returns true for regular lessons.
    pub fn is_lesson(&self) -> bool {
        self.lesson_type == DEFAULT_LESSON_TYPE
    }

    /// Returns true if the period was moved or substituted.
    pub fn is_irregular(&self) -> bool {
        self.code.as_deref() == Some("irregular")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: Id,
    pub name: Option<String>,
    pub long_name: Option<String>,
    pub alternate_name: Option<String>,
    pub fore_color: Option<String>,
    pub back_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolYear {
    pub id: i64,
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: Id,
    pub key: Option<String>,
    /// Short name (usually the login name)
    pub name: Option<String>,
    pub forename: Option<String>,
    /// Surname
    pub long_name: Option<String>,
    pub gender: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Id,
    pub name: Option<String>,
    pub forename: Option<String>,
    pub long_name: Option<String>,
    pub fore_color: Option<String>,
    pub back_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: Id,
    pub name: Option<String>,
    pub long_name: Option<String>,
    pub building: Option<String>,
    pub active: Option<bool>,
    pub fore_color: Option<String>,
    pub back_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Klasse {
    pub id: Id,
    pub name: Option<String>,
    pub long_name: Option<String>,
    pub department_id: Option<i64>,
    pub fore_color: Option<String>,
    pub back_color: Option<String>,
    /// Collected from every `teacher*` field of the upstream record
    pub teachers: Vec<Id>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: i64,
    pub name: Option<String>,
    pub long_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// A wall-clock time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayTime {
    pub hour: u8,
    pub minute: u8,
}

impl DayTime {
    /// Returns `None` unless `hour < 24` and `minute < 60`.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }
}

impl std::fmt::Display for DayTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Start and end of one time unit
pub type TimeSpan = (DayTime, DayTime);

/// Period time spans per weekday, Monday first
///
/// A day is `None` when the server has no schedule for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    pub days: [Option<Vec<TimeSpan>>; 7],
}

impl TimeGrid {
    pub fn day(&self, weekday: Weekday) -> Option<&[TimeSpan]> {
        self.days[weekday.num_days_from_monday() as usize].as_deref()
    }

    pub fn monday(&self) -> Option<&[TimeSpan]> {
        self.day(Weekday::Mon)
    }

    pub fn tuesday(&self) -> Option<&[TimeSpan]> {
        self.day(Weekday::Tue)
    }

    pub fn wednesday(&self) -> Option<&[TimeSpan]> {
        self.day(Weekday::Wed)
    }

    pub fn thursday(&self) -> Option<&[TimeSpan]> {
        self.day(Weekday::Thu)
    }

    pub fn friday(&self) -> Option<&[TimeSpan]> {
        self.day(Weekday::Fri)
    }

    pub fn saturday(&self) -> Option<&[TimeSpan]> {
        self.day(Weekday::Sat)
    }

    pub fn sunday(&self) -> Option<&[TimeSpan]> {
        self.day(Weekday::Sun)
    }
}

/// Students matching a fuzzy name lookup, best match first
///
/// Only the list for the searched name field is populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchMatches {
    pub forename_matches: Option<Vec<Student>>,
    pub surname_matches: Option<Vec<Student>>,
}

/// Identity reported by the server on login
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginInfo {
    /// The logged-in student or teacher
    pub person: Option<Id>,
    /// The class of a logged-in student
    pub klasse: Option<Id>,
}
