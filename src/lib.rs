#![warn(clippy::all, clippy::pedantic)]
// Run with `cargo clippy --all -- -D warnings`.
#![deny(missing_docs)]
//! A 3x3x3 cube state engine with move canonicalization, scrambling, facelet encoding for an
//! external two-phase solver, and a simulation harness that runs many scramble-and-solve trials.

pub mod canonical;
pub mod config;
pub mod cube;
pub mod error;
pub mod facelet;
pub mod moves;
pub mod scramble;
pub mod session;
pub mod simulation;
pub mod solver;
pub mod stages;

pub use config::Config;
pub use cube::{Color, Cube};
pub use error::Error;
pub use moves::{Face, Layer, Move, TurnType};
pub use session::Session;
pub use simulation::{Simulation, SimulationResult, TrialOutcome};
pub use solver::{FaceletSolver, SolverError, TwophaseProcess};
pub use stages::Stage;
