//! `bench_local.rs`: quick local timing runner (no Criterion)
//!
//! PURPOSE
//! -------
//! - Fast, ad-hoc timing of whole fills on *your* machine.
//! - Loads the word list once, then fills each case several times and reports the median.
//! - Every run is seeded (`seed`, `seed + 1`, ...) so the numbers are comparable across builds.
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:                `cargo run --bin bench_local --release`
//! - Multiple repeats:               `cargo run --bin bench_local --release -- -r 5`
//! - Print the grid of each case:    `cargo run --bin bench_local --release -- -p`
//! - See all flags:                  `cargo run --bin bench_local -- --help`
//!
//! NOTES
//! -----
//! - This is *not* Criterion. It's quick and convenient, not statistically rigorous.
//! - Use the same machine and `--release` for more comparable numbers.
//! - Cases live in `get_cases()` below.
//! - I/O (printing) is kept outside the timed section.
//! - We report the *median* over repeats (more robust than mean for small _N_).

use std::hint::black_box;
use std::time::Instant;

use clap::Parser;
use crossfill::entry_list::WordList;
use crossfill::solver::{self, FillConfig};

/// Simple local benchmark runner: load the word list once, time several fills.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the word list file (`WORD clue` per line)
    #[arg(
        short,
        long,
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/test_word_list.txt")
    )]
    word_list: String,

    /// Number of repeats per case (use >1 to reduce noise; median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 3)]
    num_repeats: usize,

    /// First seed; repeat `i` uses `seed + i`
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// Print the grid of the last run of each case
    #[arg(short = 'p', long = "print")]
    print_grid: bool,
}

/// A benchmark case: grid size and how many words of the list to offer.
#[derive(Clone)]
struct Case {
    grid_size: usize,
    words: usize,
}

fn get_cases() -> Vec<Case> {
    vec![
        Case { grid_size: 9, words: 15 },
        Case { grid_size: 13, words: 30 },
        Case { grid_size: 17, words: 50 },
        Case { grid_size: 25, words: 200 },
    ]
}

/// Small helper: robust central tendency for small samples.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// One row in the benchmark summary: (case name, median seconds, median words placed, words offered).
    type SummaryRow = (String, f64, usize, usize);

    let cli = Cli::parse();

    eprintln!("Loading word list from: {}", cli.word_list);
    let t_load = Instant::now();
    let wl = WordList::load_from_path(&cli.word_list)?;
    let load_secs = t_load.elapsed().as_secs_f64();
    eprintln!("Loaded {} words in {:.3}s", wl.len(), load_secs);

    let pairs = wl.pairs();
    let cases = get_cases();
    let mut summary: Vec<SummaryRow> = Vec::with_capacity(cases.len());

    for (idx, case) in cases.iter().enumerate() {
        let name = format!("{0}x{0}, {1} words", case.grid_size, case.words.min(pairs.len()));
        eprintln!("\n[{:02}] {}", idx + 1, name);
        let offered = &pairs[..case.words.min(pairs.len())];

        let mut times = Vec::with_capacity(cli.num_repeats);
        let mut placed = Vec::with_capacity(cli.num_repeats);
        let mut last_grid = None;

        for rep in 0..cli.num_repeats {
            let config = FillConfig { seed: Some(cli.seed + rep as u64), ..FillConfig::default() };

            // Keep only the *core* operation inside the timed region.
            let t_fill = Instant::now();
            let (puzzle, report) = match solver::generate(case.grid_size, black_box(offered.iter().copied()), &config) {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("  ✗ Run {}/{} failed: {}", rep + 1, cli.num_repeats, e.display_detailed());
                    continue;
                }
            };
            let fill_secs = t_fill.elapsed().as_secs_f64();

            times.push(fill_secs);
            placed.push(report.placed);
            eprintln!(
                "  run {:>2}/{:>2}: {:.3}s ({} {} placed, {:?})",
                rep + 1,
                cli.num_repeats,
                fill_secs,
                report.placed,
                pluralizer(report.placed, "word".into(), None),
                report.status
            );
            last_grid = Some(puzzle.grid().to_string());
        }

        let med = median(times);
        placed.sort_unstable();
        let med_placed = placed.get(placed.len() / 2).copied().unwrap_or(0);

        if cli.print_grid
            && let Some(grid) = last_grid
        {
            println!("{name}\n{grid}");
        }

        eprintln!("  → median {:.3}s over {} run(s)", med, cli.num_repeats);
        summary.push((name, med, med_placed, offered.len()));
    }

    eprintln!("\n==== Summary ====");
    eprintln!("{:<24} | {:>10} | {:>8} | {:>7}", "case", "median (s)", "placed", "offered");
    eprintln!("{:-<24}-+-{:-<10}-+-{:-<8}-+-{:-<7}", "", "", "", "");
    for (name, med, med_placed, offered) in &summary {
        eprintln!("{name:<24} | {med:>10.3} | {med_placed:>8} | {offered:>7}");
    }

    Ok(())
}

fn pluralizer(count: usize, singular: String, plural: Option<String>) -> String {
    if count == 1 {
        singular
    } else {
        plural.unwrap_or_else(|| singular + "s")
    }
}
