use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crossfill::entry_list::WordList;
use crossfill::puzzle::{Puzzle, Rejected};
use crossfill::solver::{self, FillConfig, FillReport, FillStatus};
use crossfill::word::{Axis, PlacedWord};

/// Version string with the commit the binary was built from
const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// Crossword grid filler
#[derive(Parser, Debug)]
#[command(author, version = VERSION, about, long_about = None)]
struct Cli {
    /// Path to the word list file (`WORD clue` or `WORD;clue` per line)
    word_list: PathBuf,

    /// Grid size (default: suggested from the number and length of the words)
    #[arg(short, long)]
    grid_size: Option<usize>,

    /// Use at most this many words, picked at random
    #[arg(short = 'n', long, default_value_t = 50)]
    number: usize,

    /// Seed for a reproducible grid
    #[arg(short, long)]
    seed: Option<u64>,

    /// Time budget for one fill, in seconds
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,

    /// Number of longest words the first word is drawn from
    #[arg(long, default_value_t = solver::DEFAULT_SEED_POOL)]
    seed_pool: usize,

    /// Grow the grid until most words are placed
    #[arg(short, long)]
    auto: bool,

    /// Replace clues with anagrams of their words
    #[arg(short, long)]
    mix: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

/// Everything the CLI reports about a finished grid.
#[derive(Serialize)]
struct Output<'a> {
    grid_size: usize,
    grid: Vec<String>,
    words: Vec<PlacedWord>,
    rejected: &'a [Rejected],
    report: &'a FillReport,
}

/// Entry point of the crossfill CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    let debug_enabled = std::env::var("CROSSFILL_DEBUG").is_ok();
    crossfill::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        if let Some(solver_err) = e.downcast_ref::<solver::SolverError>() {
            eprintln!("Error: {}", solver_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic.
///
/// 1. Load the word list, sample it, optionally scramble its clues.
/// 2. Fill a grid (growing it in `--auto` mode).
/// 3. Print the grid and the placed words on stdout, statistics on stderr.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let t_load = Instant::now();
    let mut words = WordList::load_from_path(&cli.word_list)?;
    let load_secs = t_load.elapsed().as_secs_f64();

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    words.sample(cli.number, &mut rng);
    if cli.mix {
        words.scramble_clues(&mut rng);
    }

    let grid_size = cli.grid_size.unwrap_or_else(|| words.suggested_grid_size());
    let config = FillConfig {
        time_budget: Duration::from_secs(cli.timeout),
        seed: cli.seed,
        seed_pool: cli.seed_pool,
    };

    let t_fill = Instant::now();
    let (puzzle, report) = if cli.auto {
        solver::generate_with_growth(grid_size, &words.pairs(), &config)?
    } else {
        solver::generate(grid_size, words.pairs(), &config)?
    };
    let fill_secs = t_fill.elapsed().as_secs_f64();

    if cli.json {
        let output = Output {
            grid_size: puzzle.size(),
            grid: puzzle.grid().rows(),
            words: puzzle.placed_words(),
            rejected: puzzle.rejected(),
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_puzzle(&puzzle);
    }

    if let FillStatus::TimedOut { elapsed } = report.status {
        eprintln!("⚠️  Timed out after {:.1}s; the grid may be sparser than usual", elapsed.as_secs_f64());
    }
    eprintln!(
        "Loaded {} words in {:.3}s; placed {}/{} on a {}x{} grid in {:.3}s ({} iterations).",
        words.len(),
        load_secs,
        report.placed,
        report.offered,
        puzzle.size(),
        puzzle.size(),
        fill_secs,
        report.iterations
    );

    Ok(())
}

fn print_puzzle(puzzle: &Puzzle) {
    print!("{}", puzzle.grid());
    let placed = puzzle.placed_words();
    for axis in Axis::ALL {
        let mut on_axis: Vec<&PlacedWord> = placed.iter().filter(|w| w.direction == axis).collect();
        if on_axis.is_empty() {
            continue;
        }
        on_axis.sort_by_key(|w| (w.row, w.col));
        println!("\n{}:", if axis == Axis::Across { "Across" } else { "Down" });
        for w in on_axis {
            println!("  ({}, {}) {}: {}", w.row, w.col, w.word, w.clue);
        }
    }
}
