//! One cube together with the scramble and solution recorded against it.

use log::info;

use crate::canonical::canonicalize;
use crate::cube::Cube;
use crate::error::Error;
use crate::facelet::{decode, parse_solution, to_facelet_string};
use crate::moves::{format_moves, parse_lenient, Move};
use crate::scramble::{parse_scramble, random_moves};
use crate::solver::FaceletSolver;
use crate::stages::{self, Stage};

const ALG_CUBING_URL: &str = "https://alg.cubing.net/";

/// The "current cube" and everything recorded about it.
///
/// Owns its cube outright; callers read it through [`Session::cube`] and change it only
/// through the methods here, so the records always describe what happened to it.
#[derive(Clone, Debug, Default)]
pub struct Session {
    cube: Cube,
    scramble: Vec<Move>,
    /// Every move made since the scramble, as entered. Canonicalized on read.
    solution: Vec<Move>,
    /// Moves from the latest run of each stage heuristic, indexed by `Stage as usize`.
    stages: [Vec<Move>; 4],
}

impl Session {
    /// A solved cube with empty records.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Solves the cube and clears every record.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The current cube.
    #[must_use]
    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    /// Resets, then applies |length| random face turns drawn from |rng|.
    pub fn scramble_random(&mut self, rng: &mut fastrand::Rng, length: usize) {
        self.reset();
        self.record_scramble(random_moves(rng, length));
    }

    /// Resets, then applies a scramble typed by the user. Blank text leaves a solved cube.
    pub fn scramble_text(&mut self, text: &str) {
        self.reset();
        self.record_scramble(parse_scramble(text));
    }

    fn record_scramble(&mut self, moves: Vec<Move>) {
        self.cube.apply_all(&moves);
        self.scramble = moves;
    }

    /// Resets, then takes the cube from a facelet string. The scramble record stays empty.
    ///
    /// # Errors
    ///
    /// When |facelets| isn't 54 letters of `URFDLB` with nine of each. The session is left as
    /// it was.
    pub fn load_facelets(&mut self, facelets: &str) -> Result<(), Error> {
        let cube = decode(facelets)?;
        self.reset();
        self.cube = cube;
        Ok(())
    }

    /// Applies moves entered by hand and adds them to the solution. Unknown tokens are skipped.
    pub fn execute(&mut self, text: &str) {
        let moves = parse_lenient(text);
        self.cube.apply_all(&moves);
        self.solution.extend(moves);
    }

    /// Asks |solver| for a solution to the current cube and applies as much of it as parses.
    ///
    /// The solution record is replaced. An `Error` answer, or any token that isn't a move,
    /// ends the solution there; what came before it is kept and applied. Returns the
    /// canonical move count.
    ///
    /// # Errors
    ///
    /// When the solver can't be reached. The cube and records are left as they were.
    pub fn solve(&mut self, solver: &impl FaceletSolver) -> Result<usize, Error> {
        let answer = solver.solve(&to_facelet_string(&self.cube))?;
        let moves = parse_solution(&answer);

        self.cube.apply_all(&moves);
        self.solution = moves;

        let length = self.solution_length();
        info!("Solved in {length} moves");
        Ok(length)
    }

    /// Runs one best-effort stage heuristic, recording its moves for that stage and in the
    /// solution. Returns the stage's canonical move count.
    pub fn solve_stage(&mut self, stage: Stage) -> usize {
        let moves = stages::run(stage, &mut self.cube);
        self.solution.extend_from_slice(&moves);
        self.stages[stage as usize] = moves;
        self.stage_moves(stage).len()
    }

    /// The scramble applied by the last reset-and-scramble.
    #[must_use]
    pub fn scramble(&self) -> &[Move] {
        &self.scramble
    }

    /// The scramble in move notation.
    #[must_use]
    pub fn scramble_notation(&self) -> String {
        format_moves(&self.scramble)
    }

    /// The solution in canonical form.
    #[must_use]
    pub fn solution(&self) -> Vec<Move> {
        canonicalize(&self.solution)
    }

    /// The canonical solution in move notation.
    #[must_use]
    pub fn solution_notation(&self) -> String {
        format_moves(&self.solution())
    }

    /// Number of moves in the canonical solution.
    #[must_use]
    pub fn solution_length(&self) -> usize {
        self.solution().len()
    }

    /// Canonical moves from the latest run of |stage|.
    #[must_use]
    pub fn stage_moves(&self, stage: Stage) -> Vec<Move> {
        canonicalize(&self.stages[stage as usize])
    }

    /// Canonical move counts for every stage, in [`Stage::ALL`] order.
    #[must_use]
    pub fn stage_counts(&self) -> [usize; 4] {
        Stage::ALL.map(|stage| self.stage_moves(stage).len())
    }

    /// A link that replays the scramble and solution on alg.cubing.net.
    #[must_use]
    pub fn alg_cubing_url(&self) -> String {
        let encode = |text: String| text.replace('\'', "-").replace(' ', "_");
        format!(
            "{ALG_CUBING_URL}?setup={}&alg={}",
            encode(self.scramble_notation()),
            encode(self.solution_notation())
        )
    }
}
