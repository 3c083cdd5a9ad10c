//! Conversion between [`Cube`] and the 54-character facelet strings two-phase solvers speak.

use lazy_static::lazy_static;
use log::{debug, warn};
use std::collections::HashMap;
use thiserror::Error;

use crate::cube::{Color, Cube, FaceGrid};
use crate::moves::{parse_until_invalid, Face, Move};

/// Number of characters in a facelet string.
pub const FACELET_COUNT: usize = 54;

/// The facelet string of a solved cube.
pub const SOLVED_FACELETS: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

/// The token a solver answers with when it could not solve the input.
pub const ERROR_SENTINEL: &str = "Error";

/// Faces in the order the facelet string lists them.
const FACELET_ORDER: [Face; 6] = [
    Face::Up,
    Face::Right,
    Face::Front,
    Face::Down,
    Face::Left,
    Face::Back,
];

lazy_static! {
    /// Reverse of [`solver_letter`].
    static ref COLORS_BY_LETTER: HashMap<char, Color> = Color::ALL
        .into_iter()
        .map(|color| (solver_letter(color), color))
        .collect();
}

/// Why a facelet string could not be turned back into a cube.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FaceletError {
    /// The string does not have exactly 54 characters.
    #[error("Invalid facelet count, expected {FACELET_COUNT} but got {0}")]
    WrongLength(usize),
    /// A character outside `URFDLB`.
    #[error("Invalid facelet '{0}' at position {1}")]
    UnknownFacelet(char, usize),
    /// Some color does not cover exactly nine stickers.
    #[error("Every color must appear 9 times, got counts {0:?} (U, F, R, L, D, B)")]
    UnbalancedColors([usize; 6]),
}

/// The solver alphabet letter for |color|: the face that color belongs to when solved.
#[must_use]
pub fn solver_letter(color: Color) -> char {
    match color {
        Color::White => 'U',
        Color::Yellow => 'D',
        Color::Red => 'R',
        Color::Orange => 'L',
        Color::Green => 'F',
        Color::Blue => 'B',
    }
}

/// Serializes |cube| as Up, Right, Front, Down, Left, Back, each face row-major.
#[must_use]
pub fn to_facelet_string(cube: &Cube) -> String {
    let facelets: String = FACELET_ORDER
        .iter()
        .flat_map(|face| cube.face(*face).iter().flatten())
        .map(|color| solver_letter(*color))
        .collect();
    debug!("Facelets: {facelets}");
    facelets
}

/// Rebuilds a cube from a facelet string.
///
/// # Errors
///
/// Fails when the string is not 54 letters of `URFDLB` with nine of each.
pub fn decode(facelets: &str) -> Result<Cube, FaceletError> {
    let letters: Vec<char> = facelets.chars().collect();
    if letters.len() != FACELET_COUNT {
        return Err(FaceletError::WrongLength(letters.len()));
    }

    let mut stickers: [FaceGrid; 6] = [[[Color::White; 3]; 3]; 6];
    for (i, letter) in letters.into_iter().enumerate() {
        let color = *COLORS_BY_LETTER
            .get(&letter)
            .ok_or(FaceletError::UnknownFacelet(letter, i))?;
        let face = FACELET_ORDER[i / 9];
        stickers[face as usize][(i % 9) / 3][i % 3] = color;
    }

    let cube = Cube::from_stickers(stickers);
    let counts = cube.color_counts();
    if counts.iter().any(|count| *count != 9) {
        return Err(FaceletError::UnbalancedColors(counts));
    }
    Ok(cube)
}

/// Parses a solver's answer into moves, stopping at the first token that isn't a move.
///
/// The error sentinel and trailing annotations such as a `(17)` move count both end the
/// solution; everything before them is kept.
#[must_use]
pub fn parse_solution(solution: &str) -> Vec<Move> {
    let (moves, rest) = parse_until_invalid(solution);
    match rest {
        Some(token) if token.starts_with(ERROR_SENTINEL) => {
            warn!("Solver reported {solution:?}; keeping {} moves", moves.len());
        }
        Some(token) => debug!("Solution ends at {token:?} after {} moves", moves.len()),
        None => {}
    }
    moves
}
