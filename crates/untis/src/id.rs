//! Tagged element references.

use crate::error::{Result, UntisError};
use serde::{Deserialize, Serialize};

/// Kind of element an [`Id`] refers to.
///
/// The discriminants are the numeric type codes used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    Klasse = 1,
    Teacher = 2,
    Subject = 3,
    Room = 4,
    Student = 5,
}

impl ElementType {
    /// Returns the wire type code (1..=5).
    pub fn code(self) -> i64 {
        self as i64
    }

    /// Maps a wire type code back to an element type.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(ElementType::Klasse),
            2 => Some(ElementType::Teacher),
            3 => Some(ElementType::Subject),
            4 => Some(ElementType::Room),
            5 => Some(ElementType::Student),
            _ => None,
        }
    }
}

/// A reference to a class, teacher, subject, room or student on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id {
    pub kind: ElementType,
    pub id: i64,
}

impl Id {
    pub fn new(kind: ElementType, id: i64) -> Self {
        Self { kind, id }
    }

    /// Creates an id from a raw wire type code.
    ///
    /// Fails with [`UntisError::InvalidArgument`] unless `type_code` is in `1..=5`.
    pub fn custom(type_code: i64, id: i64) -> Result<Self> {
        let kind = ElementType::from_code(type_code).ok_or_else(|| {
            UntisError::invalid_argument(format!(
                "element type code must be between 1 and 5, got {type_code}"
            ))
        })?;
        Ok(Self::new(kind, id))
    }

    pub fn klasse(id: i64) -> Self {
        Self::new(ElementType::Klasse, id)
    }

    pub fn teacher(id: i64) -> Self {
        Self::new(ElementType::Teacher, id)
    }

    pub fn subject(id: i64) -> Self {
        Self::new(ElementType::Subject, id)
    }

    pub fn room(id: i64) -> Self {
        Self::new(ElementType::Room, id)
    }

    pub fn student(id: i64) -> Self {
        Self::new(ElementType::Student, id)
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}#{}", self.kind, self.id)
    }
}
