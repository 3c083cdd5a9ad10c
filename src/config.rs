//! Settings read from a TOML file.

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::scramble::DEFAULT_SCRAMBLE_LENGTH;

/// Largest simulation request accepted unless configured otherwise.
pub const DEFAULT_MAX_TRIALS: usize = 10_000;

const CONFIG_DIR: &str = "cube_solver";
const CONFIG_FILE: &str = "config.toml";

/// Global configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Length of random scrambles.
    pub scramble_length: usize,
    /// Upper bound on the number of trials one simulation may request.
    pub max_trials: usize,
    /// Fixes the scramble generator when set.
    pub seed: Option<u64>,
    /// Whether simulation trials run on the rayon thread pool.
    pub parallel: bool,
    /// How the external solver is started and spoken to.
    pub solver: SolverConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scramble_length: DEFAULT_SCRAMBLE_LENGTH,
            max_trials: DEFAULT_MAX_TRIALS,
            seed: None,
            parallel: true,
            solver: SolverConfig::default(),
        }
    }
}

/// Command line and line protocol of the external solver process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Executable to run.
    pub program: String,
    /// Arguments passed to it.
    pub args: Vec<String>,
    /// Line the solver prints when it is ready for a request, if any.
    pub ready_line: Option<String>,
    /// Written in front of the facelet string.
    pub request_prefix: String,
    /// Lines to discard between the request and the solution line.
    pub skip_lines: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            program: "twophase".to_owned(),
            args: vec!["-c".to_owned(), "-m".to_owned(), "30".to_owned()],
            ready_line: Some("Ready!".to_owned()),
            request_prefix: "solve ".to_owned(),
            skip_lines: 1,
        }
    }
}

impl Config {
    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// When the document is not valid TOML or a key has the wrong type.
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    /// Reads the configuration file at |path|.
    ///
    /// # Errors
    ///
    /// When the file can't be read or doesn't parse.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        info!("Loading configuration from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Loads |explicit| if given, otherwise the per-user file if it exists, otherwise defaults.
    ///
    /// # Errors
    ///
    /// When a file that exists can't be read or doesn't parse. A missing per-user file is fine.
    pub fn load(explicit: Option<&Path>) -> Result<Self, Error> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// `<config dir>/cube_solver/config.toml`, where the config dir is platform specific.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push(CONFIG_DIR);
    path.push(CONFIG_FILE);
    Some(path)
}
