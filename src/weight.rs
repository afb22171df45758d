//! Path weights and the preference-to-weight encoding.
//!
//! Maximizing total preference is turned into minimizing total path weight. Each
//! rated course contributes `B^(50 - r)` where `r` is its rating in tenths
//! (`0..=50`), so a better rating yields a lighter edge. Mandatory courses and
//! pseudo-edges weigh nothing.
//!
//! # Uniqueness
//!
//! A path total is `Σ c_k · B^k`, where `c_k` is the number of selected courses
//! at rating level `k`. As long as every `c_k < B`, this sum is the base-`B`
//! numeral with digits `c_k`, so distinct rating multisets always produce
//! distinct totals and the ordering is lexicographic from the worst rating level
//! down. A combination never holds more courses than there are optional courses,
//! therefore choosing `B > normal_count` makes the encoding collision-free.

use num_bigint::BigUint;

use crate::course::Preference;

/// Arbitrary-precision path weight.
pub type Weight = BigUint;

/// Highest rating exponent: a rating of `0.0` maps to `B^50`.
pub const MAX_RATING_LEVEL: u32 = 50;

/// Smallest base ever used; enough for typical wish lists.
pub const MIN_BASE: u32 = 25;

/// Encoding of preferences into weights, together with the sentinel values
/// derived from the same base.
#[derive(Debug, Clone)]
pub struct WeightScale {
    base: BigUint,
    infeasible: Weight,
    infinite: Weight,
}

impl WeightScale {
    /// Creates a scale that is collision-free for up to `optional_courses`
    /// courses in a single combination.
    pub fn new(optional_courses: usize) -> Self {
        let base = std::cmp::max(MIN_BASE as usize, optional_courses + 1);
        Self::with_base(BigUint::from(base))
    }

    /// Creates a scale with an explicit base.
    ///
    /// # Panics
    ///
    /// Panics if `base < 2`.
    pub fn with_base(base: BigUint) -> Self {
        assert!(base >= BigUint::from(2u32), "Weight base must be at least 2");
        let infeasible = base.pow(MAX_RATING_LEVEL + 1);
        let infinite = &infeasible * 2u32;
        Self {
            base,
            infeasible,
            infinite,
        }
    }

    pub fn base(&self) -> &BigUint {
        &self.base
    }

    /// Sidetracks at or above this value are never taken, and a source distance
    /// above it means no timetable exists.
    pub fn infeasible(&self) -> &Weight {
        &self.infeasible
    }

    /// Distance assigned to vertices that cannot reach the sink.
    pub fn infinite(&self) -> &Weight {
        &self.infinite
    }

    /// Weight of an edge entering a course with the given preference.
    pub fn encode(&self, preference: Preference) -> Weight {
        match preference {
            Preference::Mandatory => Weight::ZERO,
            Preference::Rated(rating) => self.base.pow(MAX_RATING_LEVEL - rating_level(rating)),
        }
    }

    /// Weight of an edge that touches only pseudo-vertices.
    pub fn neutral(&self) -> Weight {
        Weight::ZERO
    }
}

/// Rating in tenths, clamped to `0..=50`.
pub fn rating_level(rating: f64) -> u32 {
    let level = (rating * 10.0).round();
    level.clamp(0.0, MAX_RATING_LEVEL as f64) as u32
}
