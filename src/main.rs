//! Lazor Puzzle Solver
//!
//! Reads a `.bff` puzzle, searches for a block placement that sends the lasers
//! through every target, and prints the solved board together with the beam
//! paths.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};

use lazor::solver::{check_block_sites, CancelToken, SolverConfig, DEFAULT_MAX_CELLS};
use lazor::{bff, persistence, Puzzle};

/// Solves Lazor puzzles described in `.bff` files.
#[derive(Parser)]
#[command(name = "lazor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log search progress at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a puzzle and save the placement next to it.
    Solve {
        /// Path to the `.bff` puzzle.
        file: PathBuf,
        /// Search block orderings on all cores.
        #[arg(long)]
        parallel: bool,
        /// Refuse boards with more cells than this.
        #[arg(long, default_value_t = DEFAULT_MAX_CELLS)]
        max_cells: usize,
        /// Do not write the `.solution` file.
        #[arg(long)]
        no_save: bool,
    },
    /// Re-render a previously saved solution.
    Display {
        /// Path to the `.bff` puzzle.
        file: PathBuf,
    },
    /// Render the puzzle as given, with only its fixed blocks.
    Show {
        /// Path to the `.bff` puzzle.
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    match cli.command {
        Command::Solve {
            file,
            parallel,
            max_cells,
            no_save,
        } => run_solver(
            &file,
            &SolverConfig {
                parallel,
                max_cells,
            },
            !no_save,
        ),
        Command::Display { file } => run_display(&file),
        Command::Show { file } => run_show(&file),
    }
}

fn load_puzzle(file: &Path) -> Result<Puzzle> {
    bff::load(file).with_context(|| format!("could not load puzzle {}", file.display()))
}

/// Solves the puzzle, prints the result and optionally saves it.
fn run_solver(file: &Path, config: &SolverConfig, save: bool) -> Result<()> {
    let puzzle = load_puzzle(file)?;
    let outcome = puzzle
        .solve_with(config, &CancelToken::new())
        .with_context(|| format!("could not solve {}", file.display()))?;

    let Some(placement) = outcome.placement else {
        bail!(
            "{} has no solution ({} candidates tried)",
            file.display(),
            outcome.candidates
        );
    };

    println!("{}", puzzle.format_solution(&placement));
    println!("{}", puzzle.format_beams(&placement));

    if save {
        let path = persistence::solution_path(file);
        persistence::save(&path, &placement)?;
        info!("wrote {}", path.display());
    }

    Ok(())
}

/// Loads a saved placement and renders its beams.
fn run_display(file: &Path) -> Result<()> {
    let puzzle = load_puzzle(file)?;
    let path = persistence::solution_path(file);
    let placement = persistence::load(&path)
        .with_context(|| format!("run `lazor solve {}` first", file.display()))?;
    check_block_sites(&placement)?;

    println!("{}", puzzle.format_solution(&placement));
    println!("{}", puzzle.format_beams(&placement));
    if !puzzle.is_solved_by(&placement) {
        bail!("saved placement in {} misses some targets", path.display());
    }
    Ok(())
}

/// Renders the unsolved board.
fn run_show(file: &Path) -> Result<()> {
    let puzzle = load_puzzle(file)?;
    let fixed = puzzle.fixed_placement();

    println!("{}", puzzle.format_solution(&fixed));
    println!("{}", puzzle.format_beams(&fixed));
    println!(
        "blocks to place: A={} B={} C={}",
        puzzle.inventory.reflect, puzzle.inventory.absorb, puzzle.inventory.refract
    );
    Ok(())
}
