//! Random and user-supplied scrambles.

use crate::moves::{parse_lenient, Face, Move, TurnType};

/// Scramble length used when nothing else is asked for.
pub const DEFAULT_SCRAMBLE_LENGTH: usize = 25;

const MODIFIERS: [TurnType; 3] = [TurnType::Forward, TurnType::Backward, TurnType::Double];

/// Draws |length| random face turns.
///
/// Each face is picked uniformly from the five faces other than the previous pick's, then a
/// modifier is picked uniformly and independently.
#[must_use]
pub fn random_moves(rng: &mut fastrand::Rng, length: usize) -> Vec<Move> {
    let mut moves = Vec::with_capacity(length);
    let mut last_face: Option<Face> = None;

    for _ in 0..length {
        let face = match last_face {
            None => Face::ALL[rng.usize(..Face::ALL.len())],
            Some(last) => {
                // Draw among the five other faces.
                let mut idx = rng.usize(..Face::ALL.len() - 1);
                if idx >= last as usize {
                    idx += 1;
                }
                Face::ALL[idx]
            }
        };
        let turn = MODIFIERS[rng.usize(..MODIFIERS.len())];

        moves.push(Move::face(face, turn));
        last_face = Some(face);
    }

    moves
}

/// Reads a scramble typed by a user. Case-insensitive, `'` or `i` for inverses; anything
/// unrecognised is dropped.
#[must_use]
pub fn parse_scramble(text: &str) -> Vec<Move> {
    parse_lenient(text)
}
