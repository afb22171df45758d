//! # timetable-rs: Ranked Timetable Generation in Rust
//!
//! **`timetable-rs`** enumerates conflict-free course timetables in order of
//! decreasing total preference, lazily and one page at a time.
//!
//! ## How it works
//!
//! A wish list is modeled as a layered DAG: mandatory subjects form a chain from
//! `source` to `subsource`, and optional courses are instantiated once per
//! cumulative-credit level between `subsource` and `sink`. Every source-to-sink path is
//! a timetable within the credit range, and the path weight encodes preference so
//! that lighter paths are better.
//!
//! Paths are then enumerated best first with a k-shortest-paths search in the style
//! of Eppstein: one Dijkstra run toward the sink, a forest of persistent heaps of
//! sidetrack edges, and a best-first walk over sidetrack sequences that discards
//! paths whose courses conflict.
//!
//! ## Key Features
//!
//! - **Lazy**: each call does only the work needed for the requested page.
//! - **Exact ordering**: weights are arbitrary-precision, so the rating encoding never overflows or collides.
//! - **Arena-backed persistence**: heap nodes live in one arena and are shared by index.
//!
//! ## Basic Usage
//!
//! ```rust
//! use timetable_rs::config::{CreditRange, GeneratorConfig};
//! use timetable_rs::course::{Course, Day, Preference};
//! use timetable_rs::generator::TimetableGenerator;
//!
//! // 1. Describe the wish list
//! let config = GeneratorConfig {
//!     credit: CreditRange::new(6, 9).unwrap(),
//!     wish_courses: vec![
//!         Course::new("CSE101", "01", 3, Preference::Mandatory).with_schedule(Day::Mon, 540, 615),
//!         Course::new("CSE101", "02", 3, Preference::Mandatory).with_schedule(Day::Tue, 540, 615),
//!         Course::new("MUS100", "01", 3, Preference::Rated(4.5)).with_schedule(Day::Mon, 600, 675),
//!         Course::new("HIS210", "01", 3, Preference::Rated(3.0)).with_schedule(Day::Thu, 540, 615),
//!     ],
//!     ..Default::default()
//! };
//!
//! // 2. Build the generator
//! let mut generator = TimetableGenerator::new(&config).unwrap();
//!
//! // 3. Pull the best timetables
//! let page = generator.get_course_combination(0, 3);
//! for timetable in &page {
//!     let sections = timetable.iter().filter(|c| c.id.base_code == "CSE101").count();
//!     assert_eq!(sections, 1);
//! }
//! ```
//!
//! ## Core Components
//!
//! - **[`generator`]**: The [`TimetableGenerator`][crate::generator::TimetableGenerator] facade with the paging API.
//! - **[`model`]**: Construction of the credit-level graph.
//! - **[`combinator`]**: The ranked path enumerator.
//! - **[`heap`]**: The persistent sidetrack heap arena.

pub mod bitset;
pub mod combinator;
pub mod config;
pub mod converter;
pub mod course;
pub mod error;
pub mod generator;
pub mod graph;
pub mod heap;
pub mod model;
pub mod path;
pub mod queue;
pub mod sidetrack;
pub mod sssp;
pub mod weight;
