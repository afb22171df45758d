//! Timetable enumeration benchmarks.
//!
//! Run with:
//! ```bash
//! cargo bench --bench enumerate
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use timetable_rs::config::{CreditRange, GeneratorConfig};
use timetable_rs::course::{Course, Day, Preference};
use timetable_rs::generator::TimetableGenerator;

const DAYS: [Day; 5] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];

// ============================================================================
// Helper: random wish list
// ============================================================================

/// `subjects` mandatory subjects with three sections each, plus `optional` rated courses.
fn random_wish_list(subjects: usize, optional: usize, seed: u64) -> Vec<Course> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let schedule = |course: Course, rng: &mut ChaCha8Rng| {
        let begin = 540 + 90 * rng.random_range(0..6u32);
        let day = DAYS[rng.random_range(0..DAYS.len())];
        course.with_schedule(day, begin, begin + 75)
    };

    let mut courses = Vec::new();
    for s in 0..subjects {
        for section in ["01", "02", "03"] {
            let course = Course::new(&format!("REQ{:03}", s), section, 3, Preference::Mandatory);
            courses.push(schedule(course, &mut rng));
        }
    }
    for i in 0..optional {
        let credit = rng.random_range(1..=3);
        let rating = rng.random_range(0..=50u32) as f64 / 10.0;
        let course = Course::new(&format!("OPT{:03}", i), "01", credit, Preference::Rated(rating));
        courses.push(schedule(course, &mut rng));
    }
    courses
}

fn config(subjects: usize, optional: usize) -> GeneratorConfig {
    GeneratorConfig {
        credit: CreditRange::new(15, 18).unwrap(),
        wish_courses: random_wish_list(subjects, optional, 42),
        seed: 42,
        ..Default::default()
    }
}

// ============================================================================
// Benchmark: construction (modeling, Dijkstra, heap forest)
// ============================================================================

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator/construction");
    group.sample_size(20);

    for optional in [10, 20, 40] {
        let config = config(3, optional);
        group.bench_with_input(BenchmarkId::new("optional", optional), &config, |b, config| {
            b.iter(|| TimetableGenerator::new(config).map(|g| g.count_course_combination()));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: first pages
// ============================================================================

fn bench_first_pages(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator/first_pages");
    group.sample_size(20);

    let config = config(3, 30);
    for count in [1, 10, 100] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("count", count), &count, |b, &count| {
            b.iter(|| {
                let mut generator = TimetableGenerator::new(&config).ok()?;
                Some(generator.get_course_combination(0, count).len())
            });
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: paging an already warm generator
// ============================================================================

fn bench_cached_paging(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator/cached_paging");

    let Ok(mut generator) = TimetableGenerator::new(&config(3, 30)) else {
        return;
    };
    generator.reserve_course_combination(500);

    group.bench_function("page_of_20", |b| {
        let mut index = 0;
        b.iter(|| {
            let page = generator.get_course_combination(index, 20);
            index = (index + 20) % 480;
            page.len()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_construction, bench_first_pages, bench_cached_paging);

criterion_main!(benches);
