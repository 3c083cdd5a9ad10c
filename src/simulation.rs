//! Repeated scramble-and-solve trials, keeping the best and worst outcome.

use log::{debug, info};
use rayon::prelude::*;

use crate::config::{Config, DEFAULT_MAX_TRIALS};
use crate::error::Error;
use crate::scramble::DEFAULT_SCRAMBLE_LENGTH;
use crate::session::Session;
use crate::solver::FaceletSolver;

/// Parses a trial count typed by a user. Range checks happen in [`Simulation::run`].
///
/// # Errors
///
/// When |input| isn't a whole number.
pub fn parse_trial_count(input: &str) -> Result<usize, Error> {
    input
        .trim()
        .parse()
        .map_err(|_| Error::InvalidTrialCount(input.to_owned()))
}

/// A batch of independent trials. Every trial builds and owns its own [`Session`].
#[derive(Debug, Clone, typed_builder::TypedBuilder)]
pub struct Simulation {
    /// How many trials to run.
    trials: usize,

    /// Length of each trial's random scramble.
    #[builder(default = DEFAULT_SCRAMBLE_LENGTH)]
    scramble_length: usize,

    /// Requests above this are refused before anything runs.
    #[builder(default = DEFAULT_MAX_TRIALS)]
    max_trials: usize,

    /// Trial `i` scrambles with seed `seed + i` when set, so results don't depend on threading.
    #[builder(default)]
    seed: Option<u64>,

    /// Run trials on the rayon pool.
    #[builder(default = true)]
    parallel: bool,
}

/// What one trial produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialOutcome {
    /// 1-based trial index.
    pub trial: usize,
    /// Canonical solution length.
    pub moves: usize,
    /// The scramble, in move notation.
    pub scramble: String,
}

/// The fewest- and most-move trials of a run. Ties go to the earlier trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    /// Fewest moves.
    pub best: TrialOutcome,
    /// Most moves.
    pub worst: TrialOutcome,
}

impl SimulationResult {
    fn join(self, other: Self) -> Self {
        let best = if (other.best.moves, other.best.trial) < (self.best.moves, self.best.trial) {
            other.best
        } else {
            self.best
        };
        let worst = if other.worst.moves > self.worst.moves
            || (other.worst.moves == self.worst.moves && other.worst.trial < self.worst.trial)
        {
            other.worst
        } else {
            self.worst
        };
        SimulationResult { best, worst }
    }
}

impl From<TrialOutcome> for SimulationResult {
    fn from(outcome: TrialOutcome) -> Self {
        SimulationResult {
            best: outcome.clone(),
            worst: outcome,
        }
    }
}

impl Simulation {
    /// A simulation of |trials| using the scramble length, ceiling, seed and threading from
    /// |config|.
    #[must_use]
    pub fn from_config(trials: usize, config: &Config) -> Self {
        Simulation::builder()
            .trials(trials)
            .scramble_length(config.scramble_length)
            .max_trials(config.max_trials)
            .seed(config.seed)
            .parallel(config.parallel)
            .build()
    }

    /// Runs every trial against |solver| and reports the best and worst.
    ///
    /// # Errors
    ///
    /// Refuses zero trials or more than the ceiling without running anything. If any trial
    /// can't reach the solver the whole run fails; there are no partial results.
    pub fn run(&self, solver: &impl FaceletSolver) -> Result<SimulationResult, Error> {
        if self.trials == 0 || self.trials > self.max_trials {
            return Err(Error::TrialCountOutOfRange {
                requested: self.trials,
                max: self.max_trials,
            });
        }

        let outcomes: Vec<TrialOutcome> = if self.parallel {
            (1..=self.trials)
                .into_par_iter()
                .map(|trial| self.run_trial(trial, solver))
                .collect::<Result<_, _>>()?
        } else {
            (1..=self.trials)
                .map(|trial| self.run_trial(trial, solver))
                .collect::<Result<_, _>>()?
        };

        let result = outcomes
            .into_par_iter()
            .map(SimulationResult::from)
            .reduce_with(SimulationResult::join)
            .ok_or(Error::TrialCountOutOfRange {
                requested: self.trials,
                max: self.max_trials,
            })?;

        info!(
            "{} simulations: best #{} with {} moves, worst #{} with {} moves",
            self.trials, result.best.trial, result.best.moves, result.worst.trial, result.worst.moves
        );
        Ok(result)
    }

    fn run_trial(&self, trial: usize, solver: &impl FaceletSolver) -> Result<TrialOutcome, Error> {
        let mut rng = match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed.wrapping_add(trial as u64)),
            None => fastrand::Rng::new(),
        };

        let mut session = Session::new();
        session.scramble_random(&mut rng, self.scramble_length);
        let scramble = session.scramble_notation();
        let moves = session.solve(solver)?;

        debug!("Trial {trial}: {moves} moves for {scramble}");
        Ok(TrialOutcome {
            trial,
            moves,
            scramble,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::Cube;
    use crate::facelet::to_facelet_string;
    use crate::scramble::random_moves;
    use crate::solver::SolverError;

    /// Answers with one move per Up sticker that isn't white, alternating R and U so nothing
    /// merges.
    fn counting_solver(facelets: &str) -> Result<String, SolverError> {
        let wrong = facelets.chars().take(9).filter(|c| *c != 'U').count();
        Ok(["R", "U"].iter().cycle().take(wrong + 1).copied().collect::<Vec<_>>().join(" "))
    }

    #[test]
    fn test_single_trial_is_best_and_worst() {
        let result = Simulation::builder()
            .trials(1)
            .seed(Some(3))
            .build()
            .run(&counting_solver)
            .unwrap();
        assert_eq!(result.best, result.worst);
        assert_eq!(1, result.best.trial);
        assert_eq!(25, result.best.scramble.split_whitespace().count());
    }

    #[test]
    fn test_ties_keep_first_trial() {
        let solver = |_: &str| Ok::<_, SolverError>("R U F".to_owned());
        let result = Simulation::builder().trials(40).build().run(&solver).unwrap();
        assert_eq!(1, result.best.trial);
        assert_eq!(1, result.worst.trial);
        assert_eq!(3, result.best.moves);
        assert_eq!(3, result.worst.moves);
    }

    #[test]
    fn test_matches_sequential_reference() {
        let seed = 99;
        let trials = 60;

        let mut best: Option<(usize, usize)> = None;
        let mut worst: Option<(usize, usize)> = None;
        for trial in 1..=trials {
            let mut cube = Cube::solved();
            let mut rng = fastrand::Rng::with_seed(seed + trial as u64);
            cube.apply_all(&random_moves(&mut rng, DEFAULT_SCRAMBLE_LENGTH));
            let moves = counting_solver(&to_facelet_string(&cube))
                .unwrap()
                .split_whitespace()
                .count();
            if best.map_or(true, |(_, m)| moves < m) {
                best = Some((trial, moves));
            }
            if worst.map_or(true, |(_, m)| moves > m) {
                worst = Some((trial, moves));
            }
        }

        for parallel in [true, false] {
            let result = Simulation::builder()
                .trials(trials)
                .seed(Some(seed))
                .parallel(parallel)
                .build()
                .run(&counting_solver)
                .unwrap();
            assert_eq!(best, Some((result.best.trial, result.best.moves)));
            assert_eq!(worst, Some((result.worst.trial, result.worst.moves)));
        }
    }

    #[test]
    fn test_out_of_range_runs_nothing() {
        let calls = std::sync::atomic::AtomicUsize::new(0);
        let solver = |_: &str| {
            calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok::<_, SolverError>(String::new())
        };

        for trials in [0, 11] {
            let result = Simulation::builder()
                .trials(trials)
                .max_trials(10)
                .build()
                .run(&solver);
            assert!(matches!(
                result,
                Err(Error::TrialCountOutOfRange { max: 10, .. })
            ));
        }
        assert_eq!(0, calls.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[test]
    fn test_solver_failure_fails_run() {
        let solver = |_: &str| Err::<String, _>(SolverError::Closed);
        let result = Simulation::builder().trials(5).build().run(&solver);
        assert!(matches!(result, Err(Error::Solver(SolverError::Closed))));
    }

    #[test]
    fn test_parse_trial_count() {
        assert_eq!(25, parse_trial_count(" 25 ").unwrap());
        assert!(matches!(
            parse_trial_count("lots"),
            Err(Error::InvalidTrialCount(_))
        ));
        assert!(matches!(
            parse_trial_count("-3"),
            Err(Error::InvalidTrialCount(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            seed: Some(1),
            parallel: false,
            scramble_length: 10,
            ..Config::default()
        };
        let result = Simulation::from_config(2, &config)
            .run(&counting_solver)
            .unwrap();
        assert_eq!(10, result.best.scramble.split_whitespace().count());
    }
}
