use std::collections::BTreeSet;

use clap::Parser;
use log::info;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use timetable_rs::config::{CreditRange, GeneratorConfig};
use timetable_rs::course::{Course, Day, Preference};
use timetable_rs::generator::TimetableGenerator;

const DAYS: [Day; 5] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of timetables to print.
    #[arg(value_name = "INT", default_value = "5")]
    count: usize,

    /// Index of the first timetable to print.
    #[clap(long, value_name = "INT", default_value = "0")]
    skip: usize,

    /// Minimum total credit.
    #[clap(long, value_name = "INT", default_value = "15")]
    min_credit: u32,

    /// Maximum total credit.
    #[clap(long, value_name = "INT", default_value = "18")]
    max_credit: u32,

    /// Number of mandatory subjects (two sections each).
    #[clap(long, value_name = "INT", default_value = "2")]
    mandatory: usize,

    /// Number of optional courses.
    #[clap(long, value_name = "INT", default_value = "20")]
    optional: usize,

    /// Keep Friday free.
    #[clap(long)]
    free_friday: bool,

    /// Random seed for the catalog and the generator.
    #[clap(long, value_name = "INT", default_value = "42")]
    seed: u64,
}

fn random_catalog(args: &Cli) -> Vec<Course> {
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut courses = Vec::new();
    let mut add = |base: String, section: &str, credit: u32, preference: Preference, rng: &mut ChaCha8Rng| {
        let day = DAYS[rng.random_range(0..DAYS.len())];
        let begin = 540 + 90 * rng.random_range(0..6u32);
        let course = Course::new(&base, section, credit, preference)
            .with_name(format!("Course {}", base))
            .with_schedule(day, begin, begin + 75);
        courses.push(course);
    };

    for s in 0..args.mandatory {
        let credit = rng.random_range(2..=3);
        for section in ["01", "02"] {
            add(format!("REQ{:02}", s), section, credit, Preference::Mandatory, &mut rng);
        }
    }
    for i in 0..args.optional {
        let credit = rng.random_range(1..=3);
        let rating = rng.random_range(0..=50u32) as f64 / 10.0;
        add(format!("OPT{:02}", i), "01", credit, Preference::Rated(rating), &mut rng);
    }
    courses
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let mut break_days = BTreeSet::new();
    if args.free_friday {
        break_days.insert(Day::Fri);
    }
    let config = GeneratorConfig {
        credit: CreditRange::new(args.min_credit, args.max_credit)?,
        break_days,
        wish_courses: random_catalog(&args),
        seed: args.seed,
        ..Default::default()
    };
    println!("Wish list:");
    for course in &config.wish_courses {
        let when: Vec<String> = course.schedules.iter().map(|s| format!("{} {}", s.day, s.time)).collect();
        println!("  {:<24} {:<10} {}", course.to_string(), format!("{:?}", course.preference), when.join(", "));
    }

    let mut generator = TimetableGenerator::new(&config)?;
    let timetables = generator.get_course_combination(args.skip, args.count);
    info!("Generated {} timetables", generator.count_course_combination());

    for (i, timetable) in timetables.iter().enumerate() {
        let credit: u32 = timetable.iter().map(|c| c.credit).sum();
        let score: f64 = timetable.iter().map(|c| c.preference.score()).sum();
        println!("#{} ({} credits, score {:.1}):", args.skip + i + 1, credit, score);
        for course in timetable {
            println!("  {}", course);
        }
    }
    if generator.is_exhausted() {
        println!("No more timetables");
    }

    let time_total = time_total.elapsed();
    println!("\nAll done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
