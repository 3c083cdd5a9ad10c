//! The crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::facelet::FaceletError;
use crate::solver::SolverError;

/// Everything that can go wrong outside the deliberately lenient move handling.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested number of simulation trials is not a number.
    #[error("Invalid number of simulations {0:?}, expected a positive whole number")]
    InvalidTrialCount(String),
    /// The requested number of simulation trials is zero or above the configured maximum.
    #[error("Number of simulations must be between 1 and {max}, got {requested}")]
    TrialCountOutOfRange {
        /// What was asked for.
        requested: usize,
        /// The configured ceiling.
        max: usize,
    },
    /// The external solver could not be reached.
    #[error(transparent)]
    Solver(#[from] SolverError),
    /// A facelet string could not be decoded.
    #[error(transparent)]
    Facelet(#[from] FaceletError),
    /// The configuration file could not be read.
    #[error("Failed to read configuration file {}: {source}", path.display())]
    ConfigRead {
        /// The file that was asked for.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },
    /// The configuration file is not valid.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
