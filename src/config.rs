//! Generator configuration.
//!
//! # Example
//!
//! ```
//! use timetable_rs::config::{BreakTime, CreditRange, GeneratorConfig};
//! use timetable_rs::course::{Course, Day, Preference};
//!
//! let config = GeneratorConfig {
//!     credit: CreditRange::new(6, 9).unwrap(),
//!     break_days: [Day::Fri].into_iter().collect(),
//!     break_times: vec![BreakTime::new(Day::Mon, 720, 780)],
//!     wish_courses: vec![
//!         Course::new("MATH101", "01", 3, Preference::Mandatory).with_schedule(Day::Mon, 540, 615),
//!         Course::new("ART200", "01", 3, Preference::Rated(4.5)).with_schedule(Day::Fri, 540, 615),
//!     ],
//!     ..Default::default()
//! };
//!
//! let (essential, normal) = config.partition();
//! assert_eq!(essential.len(), 1);
//! assert!(normal.is_empty()); // ART200 meets on a break day
//! ```

use std::collections::BTreeSet;

use log::debug;

use crate::course::{Course, Day, TimeRange};
use crate::error::GeneratorError;

/// Inclusive range of total credits a timetable may have.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CreditRange {
    min: u32,
    max: u32,
}

impl CreditRange {
    pub fn new(min: u32, max: u32) -> Result<Self, GeneratorError> {
        if min > max {
            return Err(GeneratorError::InvalidCreditRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// A range containing exactly one value.
    pub fn exact(credit: u32) -> Self {
        Self {
            min: credit,
            max: credit,
        }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// How many credits below `max` a timetable may stop.
    pub fn tolerance(&self) -> u32 {
        self.max - self.min
    }

    pub fn contains(&self, credit: u32) -> bool {
        (self.min..=self.max).contains(&credit)
    }
}

impl Default for CreditRange {
    fn default() -> Self {
        Self { min: 0, max: 24 }
    }
}

/// A time window the student keeps free on one day.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BreakTime {
    pub day: Day,
    pub time: TimeRange,
}

impl BreakTime {
    pub fn new(day: Day, begin: u32, end: u32) -> Self {
        Self {
            day,
            time: TimeRange::new(begin, end),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Allowed total credit (default: 0..=24)
    pub credit: CreditRange,
    /// Days without any class (default: none)
    pub break_days: BTreeSet<Day>,
    /// Time windows without any class (default: none)
    pub break_times: Vec<BreakTime>,
    /// Candidate courses; mandatory ones carry [`Preference::Mandatory`][crate::course::Preference::Mandatory]
    pub wish_courses: Vec<Course>,
    /// Seed of the randomized heap melds (default: 0)
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            credit: CreditRange::default(),
            break_days: BTreeSet::new(),
            break_times: Vec::new(),
            wish_courses: Vec::new(),
            seed: 0,
        }
    }
}

impl GeneratorConfig {
    /// Returns true if the course meets on a break day or during a break time.
    pub fn is_blocked(&self, course: &Course) -> bool {
        self.break_days.iter().any(|&day| course.meets_on(day))
            || self.break_times.iter().any(|b| course.meets_during(b.day, &b.time))
    }

    /// Drops blocked courses and splits the rest into `(essential, normal)`.
    ///
    /// Essential courses are sorted by base code, so that the sections of one
    /// subject are contiguous; the relative order of sections is kept.
    pub fn partition(&self) -> (Vec<Course>, Vec<Course>) {
        let (mut essential, normal): (Vec<Course>, Vec<Course>) = self
            .wish_courses
            .iter()
            .filter(|c| {
                let blocked = self.is_blocked(c);
                if blocked {
                    debug!("partition: dropping {} (meets during a break)", c.id);
                }
                !blocked
            })
            .cloned()
            .partition(|c| c.is_mandatory());
        essential.sort_by(|a, b| a.base_code().cmp(b.base_code()));
        (essential, normal)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::course::Preference;

    #[test]
    fn test_credit_range() {
        assert!(CreditRange::new(10, 5).is_err());
        let r = CreditRange::new(15, 18).unwrap();
        assert_eq!(r.tolerance(), 3);
        assert!(r.contains(15) && r.contains(18));
        assert!(!r.contains(19));
        assert_eq!(CreditRange::exact(12).tolerance(), 0);
    }

    #[test]
    fn test_blocked_courses() {
        let config = GeneratorConfig {
            break_days: [Day::Wed].into_iter().collect(),
            break_times: vec![BreakTime::new(Day::Mon, 720, 780)],
            ..Default::default()
        };
        let wed = Course::new("A", "01", 3, Preference::Rated(3.0)).with_schedule(Day::Wed, 540, 600);
        let lunch = Course::new("B", "01", 3, Preference::Rated(3.0)).with_schedule(Day::Mon, 750, 800);
        let morning = Course::new("C", "01", 3, Preference::Rated(3.0)).with_schedule(Day::Mon, 540, 720);
        assert!(config.is_blocked(&wed));
        assert!(config.is_blocked(&lunch));
        assert!(!config.is_blocked(&morning));
    }

    #[test]
    fn test_partition_groups_sections() {
        let config = GeneratorConfig {
            wish_courses: vec![
                Course::new("PHY", "01", 3, Preference::Mandatory),
                Course::new("ENG", "01", 2, Preference::Rated(4.0)),
                Course::new("CSE", "02", 3, Preference::Mandatory),
                Course::new("PHY", "02", 3, Preference::Mandatory),
                Course::new("CSE", "01", 3, Preference::Mandatory),
            ],
            ..Default::default()
        };
        let (essential, normal) = config.partition();
        let ids: Vec<_> = essential.iter().map(|c| c.id.to_string()).collect();
        assert_eq!(ids, vec!["CSE-02", "CSE-01", "PHY-01", "PHY-02"]);
        assert_eq!(normal.len(), 1);
    }
}
