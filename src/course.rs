//! Courses, schedules and preferences.
//!
//! A [`Course`] is one offered section of a subject. Two courses conflict when they
//! are sections of the same subject (same base code), or when any of their weekly
//! meetings overlap on the same day.

use std::fmt;

use crate::error::GeneratorError;

/// Raw rating value reserved for mandatory courses.
pub const MANDATORY_RATING: f64 = 6.0;

/// Highest rating an optional course may carry.
pub const MAX_RATING: f64 = 5.0;

/// Day of the week.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Half-open time range `[begin, end)` in minutes since midnight.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TimeRange {
    pub begin: u32,
    pub end: u32,
}

impl TimeRange {
    pub fn new(begin: u32, end: u32) -> Self {
        Self { begin, end }
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.begin < other.end && self.end > other.begin
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02} ~ {:02}:{:02}",
            self.begin / 60,
            self.begin % 60,
            self.end / 60,
            self.end % 60
        )
    }
}

/// One weekly meeting of a course.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Schedule {
    pub day: Day,
    pub time: TimeRange,
    pub room: String,
}

impl Schedule {
    pub fn conflicts_with(&self, other: &Schedule) -> bool {
        self.day == other.day && self.time.overlaps(&other.time)
    }
}

/// How much the student wants a course.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Preference {
    /// The course (one section of its subject) must be in every timetable.
    Mandatory,
    /// Optional course rated in `0.0..=5.0`, higher is better.
    Rated(f64),
}

impl Preference {
    /// Interprets a raw rating, where [`MANDATORY_RATING`] marks a mandatory course.
    pub fn from_rating(rating: f64) -> Self {
        if rating == MANDATORY_RATING {
            Preference::Mandatory
        } else {
            Preference::Rated(rating)
        }
    }

    pub fn is_mandatory(&self) -> bool {
        matches!(self, Preference::Mandatory)
    }

    /// Contribution to the total preference of a timetable (mandatory is neutral).
    pub fn score(&self) -> f64 {
        match *self {
            Preference::Mandatory => 0.0,
            Preference::Rated(rating) => rating,
        }
    }
}

/// Course identity: the subject (`base_code`) and the offered section.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CourseId {
    pub base_code: String,
    pub section_code: String,
}

impl CourseId {
    pub fn new(base_code: impl Into<String>, section_code: impl Into<String>) -> Self {
        Self {
            base_code: base_code.into(),
            section_code: section_code.into(),
        }
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base_code, self.section_code)
    }
}

/// An offered course section.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub professor: String,
    pub credit: u32,
    pub preference: Preference,
    pub schedules: Vec<Schedule>,
}

impl Course {
    pub fn new(base_code: &str, section_code: &str, credit: u32, preference: Preference) -> Self {
        Self {
            id: CourseId::new(base_code, section_code),
            name: String::new(),
            professor: String::new(),
            credit,
            preference,
            schedules: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_professor(mut self, professor: impl Into<String>) -> Self {
        self.professor = professor.into();
        self
    }

    /// Adds a weekly meeting `[begin, end)` (minutes since midnight).
    pub fn with_schedule(mut self, day: Day, begin: u32, end: u32) -> Self {
        self.schedules.push(Schedule {
            day,
            time: TimeRange::new(begin, end),
            room: String::new(),
        });
        self
    }

    pub fn base_code(&self) -> &str {
        &self.id.base_code
    }

    pub fn is_mandatory(&self) -> bool {
        self.preference.is_mandatory()
    }

    /// Same subject, or any two meetings overlap.
    pub fn conflicts_with(&self, other: &Course) -> bool {
        if self.id.base_code == other.id.base_code {
            return true;
        }
        self.schedules
            .iter()
            .any(|a| other.schedules.iter().any(|b| a.conflicts_with(b)))
    }

    /// Returns true if the course meets on the given day.
    pub fn meets_on(&self, day: Day) -> bool {
        self.schedules.iter().any(|s| s.day == day)
    }

    /// Returns true if any meeting overlaps `time` on `day`.
    pub fn meets_during(&self, day: Day, time: &TimeRange) -> bool {
        self.schedules.iter().any(|s| s.day == day && s.time.overlaps(time))
    }

    /// Checks the invariants the generator relies on.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.credit == 0 {
            return Err(GeneratorError::ZeroCredit { id: self.id.clone() });
        }
        if let Preference::Rated(rating) = self.preference {
            if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
                return Err(GeneratorError::InvalidRating {
                    id: self.id.clone(),
                    rating,
                });
            }
        }
        for s in &self.schedules {
            if s.time.begin >= s.time.end {
                return Err(GeneratorError::InvalidTimeRange {
                    id: self.id.clone(),
                    day: s.day,
                    begin: s.time.begin,
                    end: s.time.end,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if !self.name.is_empty() {
            write!(f, " {}", self.name)?;
        }
        write!(f, " ({} cr)", self.credit)
    }
}
