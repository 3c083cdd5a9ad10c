//! Command line front end: scramble, apply and canonicalize moves, solve with the external
//! two-phase solver, run the stage heuristics, and simulate many solves.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use cube_solver_rs::canonical::canonicalize;
use cube_solver_rs::facelet::to_facelet_string;
use cube_solver_rs::moves::{format_moves, parse_lenient};
use cube_solver_rs::simulation::parse_trial_count;
use cube_solver_rs::{Config, Cube, Error, Session, Simulation, Stage, TwophaseProcess};
use env_logger::TimestampPrecision;
use log::{error, LevelFilter};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file in TOML format. Defaults to the per-user config file if present.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a random scramble and the facelets it leaves.
    Scramble {
        /// Number of face turns. Defaults to the configured scramble length.
        #[arg(long)]
        length: Option<usize>,
        /// Seed for the scramble generator.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Apply moves to a solved cube and print the net and the facelets.
    Apply {
        /// The move sequence, e.g. "R U' F2".
        moves: String,
    },
    /// Print the canonical form of a move sequence.
    Canonicalize {
        /// The move sequence, e.g. "Y F F R R'".
        moves: String,
    },
    /// Scramble, then solve with the external solver.
    Solve {
        /// Scramble to use instead of a random one.
        #[arg(long, conflicts_with = "facelets")]
        scramble: Option<String>,
        /// Solve this 54-letter URFDLB facelet string instead of scrambling.
        #[arg(long)]
        facelets: Option<String>,
        /// Seed for the random scramble.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Scramble, then run the cross, F2L, OLL and PLL heuristics.
    Steps {
        /// Scramble to use instead of a random one.
        #[arg(long)]
        scramble: Option<String>,
    },
    /// Run many scramble-and-solve trials and report the best and worst.
    Simulate {
        /// Number of trials.
        count: String,
        /// Base seed; trial i uses seed + i.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Scramble { length, seed } => {
            let mut session = Session::new();
            session.scramble_random(
                &mut rng(seed.or(config.seed)),
                length.unwrap_or(config.scramble_length),
            );
            println!("{}", session.scramble_notation());
            println!("{}", to_facelet_string(session.cube()));
        }
        Commands::Apply { moves } => {
            let mut cube = Cube::solved();
            cube.apply_all(&parse_lenient(&moves));
            print!("{cube}");
            println!("{}", to_facelet_string(&cube));
            if cube.is_solved() {
                println!("Solved");
            }
        }
        Commands::Canonicalize { moves } => {
            let moves = parse_lenient(&moves);
            let canonical = canonicalize(&moves);
            println!("{} ({} moves)", format_moves(&canonical), canonical.len());
        }
        Commands::Solve {
            scramble,
            facelets,
            seed,
        } => {
            let mut session = match facelets {
                Some(facelets) => {
                    let mut session = Session::new();
                    session.load_facelets(&facelets)?;
                    session
                }
                None => scrambled(scramble.as_deref(), seed, &config),
            };
            let solver = TwophaseProcess::new(config.solver.clone());
            let length = session.solve(&solver)?;
            println!("Scramble: {}", session.scramble_notation());
            println!("Solution: {} ({length} moves)", session.solution_notation());
            if !session.cube().is_solved() {
                println!("The solver's answer did not solve the cube");
            }
            println!("{}", session.alg_cubing_url());
        }
        Commands::Steps { scramble } => {
            let mut session = scrambled(scramble.as_deref(), None, &config);
            println!("Scramble: {}", session.scramble_notation());
            for stage in Stage::ALL {
                let count = session.solve_stage(stage);
                println!(
                    "{stage}: {} ({count} moves)",
                    format_moves(&session.stage_moves(stage))
                );
            }
            println!("Total: {} moves", session.solution_length());
        }
        Commands::Simulate { count, seed } => {
            let trials = parse_trial_count(&count)?;
            let mut config = config;
            config.seed = seed.or(config.seed);
            let solver = TwophaseProcess::new(config.solver.clone());
            let result = Simulation::from_config(trials, &config).run(&solver)?;
            println!(
                "Best: {} moves (simulation #{}) for {}",
                result.best.moves, result.best.trial, result.best.scramble
            );
            println!(
                "Worst: {} moves (simulation #{}) for {}",
                result.worst.moves, result.worst.trial, result.worst.scramble
            );
        }
    }
    Ok(())
}

fn rng(seed: Option<u64>) -> fastrand::Rng {
    seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
}

/// A session scrambled with |text| if given, otherwise randomly.
fn scrambled(text: Option<&str>, seed: Option<u64>, config: &Config) -> Session {
    let mut session = Session::new();
    match text {
        Some(text) => session.scramble_text(text),
        None => session.scramble_random(&mut rng(seed.or(config.seed)), config.scramble_length),
    }
    session
}
