//! Pageable timetable generation.
//!
//! # Example
//!
//! ```
//! use timetable_rs::config::{CreditRange, GeneratorConfig};
//! use timetable_rs::course::{Course, Day, Preference};
//! use timetable_rs::generator::TimetableGenerator;
//!
//! let config = GeneratorConfig {
//!     credit: CreditRange::new(6, 6).unwrap(),
//!     wish_courses: vec![
//!         Course::new("MATH101", "01", 3, Preference::Mandatory).with_schedule(Day::Mon, 540, 615),
//!         Course::new("ART200", "01", 3, Preference::Rated(4.5)).with_schedule(Day::Tue, 540, 615),
//!         Course::new("BIO110", "01", 3, Preference::Rated(3.0)).with_schedule(Day::Wed, 540, 615),
//!     ],
//!     ..Default::default()
//! };
//!
//! let mut generator = TimetableGenerator::new(&config).unwrap();
//! let page = generator.get_course_combination(0, 10);
//! assert_eq!(page.len(), 2);
//! assert_eq!(page[0][1].id.base_code, "ART200");
//! ```

use std::collections::HashSet;

use log::{debug, info};

use crate::bitset::BitSet;
use crate::combinator::{Combinator, CombinatorWithSidetrack};
use crate::config::{CreditRange, GeneratorConfig};
use crate::course::Course;
use crate::error::GeneratorError;
use crate::model::TimetableModel;

/// Validates every course and rejects a repeated `(base_code, section_code)`.
fn check_courses<'a>(courses: impl IntoIterator<Item = &'a Course>) -> Result<(), GeneratorError> {
    let mut seen = HashSet::new();
    for course in courses {
        course.validate()?;
        if !seen.insert(&course.id) {
            return Err(GeneratorError::DuplicateCourse { id: course.id.clone() });
        }
    }
    Ok(())
}

pub struct TimetableGenerator {
    /// `[essential.., normal..]`, indexed by flat index.
    courses: Vec<Course>,
    combinator: Option<Box<dyn Combinator>>,
    combinations: Vec<BitSet>,
}

impl TimetableGenerator {
    /// Validates the configuration, drops courses meeting during breaks and
    /// builds the enumerator.
    pub fn new(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        check_courses(&config.wish_courses)?;
        let (essential, normal) = config.partition();
        let mut generator = Self::build(essential, normal, config.credit, config.seed)?;

        // A mandatory subject whose every section meets during a break cannot be taken.
        let required: HashSet<&str> = config
            .wish_courses
            .iter()
            .filter(|c| c.is_mandatory())
            .map(|c| c.base_code())
            .collect();
        let kept: HashSet<&str> = generator
            .courses
            .iter()
            .filter(|c| c.is_mandatory())
            .map(|c| c.base_code())
            .collect();
        if let Some(missing) = required.difference(&kept).next() {
            info!("TimetableGenerator: every section of mandatory {} meets during a break", missing);
            generator.combinator = None;
        }
        Ok(generator)
    }

    /// Builds a generator from already partitioned selections.
    ///
    /// Courses in `essential` are treated as mandatory regardless of their
    /// preference, and are grouped by base code.
    pub fn from_selections(essential: Vec<Course>, normal: Vec<Course>, credit: CreditRange) -> Result<Self, GeneratorError> {
        check_courses(essential.iter().chain(&normal))?;
        Self::build(essential, normal, credit, 0)
    }

    /// Expects courses already checked by [`check_courses`].
    fn build(mut essential: Vec<Course>, normal: Vec<Course>, credit: CreditRange, seed: u64) -> Result<Self, GeneratorError> {
        essential.sort_by(|a, b| a.base_code().cmp(b.base_code()));

        let combinator: Option<Box<dyn Combinator>> = match TimetableModel::build(&essential, &normal, credit.min(), credit.max())? {
            Some(model) => Some(Box::new(CombinatorWithSidetrack::new(
                &model.graph,
                model.conflicts,
                model.conv,
                &model.scale,
                seed,
            ))),
            None => None,
        };

        info!(
            "TimetableGenerator: {} essential, {} normal courses, credit {}..={}",
            essential.len(),
            normal.len(),
            credit.min(),
            credit.max()
        );

        let mut courses = essential;
        courses.extend(normal);
        Ok(Self {
            courses,
            combinator,
            combinations: Vec::new(),
        })
    }

    /// Pulls up to `count` new non-empty combinations into the cache.
    /// Returns the number added; fewer than `count` means exhaustion.
    fn create_combinations(&mut self, count: usize) -> usize {
        let mut added = 0;
        while added < count {
            let Some(combinator) = self.combinator.as_mut() else {
                break;
            };
            let batch = combinator.next_combination(count - added);
            let exhausted = batch.len() < count - added;
            for set in batch {
                if set.is_empty() {
                    debug!("TimetableGenerator: skipping empty combination");
                    continue;
                }
                self.combinations.push(set);
                added += 1;
            }
            if exhausted {
                info!(
                    "TimetableGenerator: exhausted after {} combinations",
                    self.combinations.len()
                );
                self.combinator = None;
            }
        }
        added
    }

    fn to_courses(&self, set: &BitSet) -> Vec<Course> {
        set.iter()
            .filter_map(|flat| self.courses.get(flat))
            .cloned()
            .collect()
    }

    /// Returns up to `count` timetables starting at `index`, best first.
    ///
    /// Fewer than `count` (possibly none) are returned once every timetable has
    /// been produced. Repeated calls with the same arguments return the same result.
    pub fn get_course_combination(&mut self, index: usize, count: usize) -> Vec<Vec<Course>> {
        let wanted = index.saturating_add(count);
        if wanted > self.combinations.len() {
            self.create_combinations(wanted - self.combinations.len());
        }
        let end = wanted.min(self.combinations.len());
        let start = index.min(end);
        self.combinations[start..end]
            .iter()
            .map(|set| self.to_courses(set))
            .collect()
    }

    /// Makes sure at least `count` timetables are cached, if that many exist.
    pub fn reserve_course_combination(&mut self, count: usize) {
        if count > self.combinations.len() {
            self.create_combinations(count - self.combinations.len());
        }
    }

    /// Number of timetables generated so far.
    pub fn count_course_combination(&self) -> usize {
        self.combinations.len()
    }

    /// Returns true once no further timetable can be produced.
    pub fn is_exhausted(&self) -> bool {
        self.combinator.as_ref().map_or(true, |c| c.is_exhausted())
    }

    /// Courses by flat index: essential (sorted by base code) then normal.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }
}
