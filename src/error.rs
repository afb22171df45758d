//! Errors reported for malformed generator input.
//!
//! Infeasible configurations are not errors: they simply produce no timetables.

use thiserror::Error;

use crate::course::{CourseId, Day};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("Minimum credit {min} exceeds maximum credit {max}")]
    InvalidCreditRange { min: u32, max: u32 },

    #[error("Course {id} has zero credit")]
    ZeroCredit { id: CourseId },

    #[error("Course {id} appears more than once")]
    DuplicateCourse { id: CourseId },

    #[error("Course {id} has rating {rating}, expected a value in 0.0..=5.0")]
    InvalidRating { id: CourseId, rating: f64 },

    #[error("Sections of mandatory course {base_code} differ in credit")]
    InconsistentSectionCredit { base_code: String },

    #[error("Course {id} has an empty time range {begin}..{end} on {day}")]
    InvalidTimeRange { id: CourseId, day: Day, begin: u32, end: u32 },
}
