//! Best-effort CFOP stage heuristics.
//!
//! These are not a solver. Each stage looks at a few stickers and, if they are not already in
//! place, applies one fixed algorithm. They make no promise of progress on an arbitrary
//! scramble and exist so the four stage move lists have something to show.

use std::fmt;

use crate::cube::{Color, Cube};
use crate::moves::{parse_lenient, Face, Move, TurnType};

/// The four CFOP stages, in solving order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// White cross.
    Cross,
    /// First two layers.
    F2L,
    /// Orient last layer.
    Oll,
    /// Permute last layer.
    Pll,
}

impl Stage {
    /// Every stage, indexed by `stage as usize`.
    pub const ALL: [Self; 4] = [Stage::Cross, Stage::F2L, Stage::Oll, Stage::Pll];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Cross => "Cross",
            Stage::F2L => "F2L",
            Stage::Oll => "OLL",
            Stage::Pll => "PLL",
        })
    }
}

const OLL_ALG: &str = "F R U R' U' F'";
const PLL_ALG: &str = "R U R' U R U2 R'";

/// Edge cells of a face grid, row-major.
const EDGE_CELLS: [(usize, usize); 4] = [(0, 1), (1, 0), (1, 2), (2, 1)];

/// A middle-layer slot: two edge stickers that should show their faces' solved colors, and
/// the algorithm applied when they don't.
struct Slot {
    stickers: [(Face, usize, usize); 2],
    alg: &'static str,
}

const F2L_SLOTS: [Slot; 4] = [
    Slot {
        stickers: [(Face::Front, 1, 0), (Face::Left, 1, 2)],
        alg: "U L U' L'",
    },
    Slot {
        stickers: [(Face::Front, 1, 2), (Face::Right, 1, 0)],
        alg: "U' R U R'",
    },
    Slot {
        stickers: [(Face::Back, 1, 2), (Face::Left, 1, 0)],
        alg: "U2 L U2 L'",
    },
    Slot {
        stickers: [(Face::Back, 1, 0), (Face::Right, 1, 2)],
        alg: "U2 R U2 R'",
    },
];

/// Runs |stage|'s heuristic on |cube|, returning the moves it applied.
pub fn run(stage: Stage, cube: &mut Cube) -> Vec<Move> {
    match stage {
        Stage::Cross => {
            let moves = cross(cube);
            cube.apply_all(&moves);
            moves
        }
        Stage::F2L => f2l(cube),
        Stage::Oll => {
            let done = is_face_solved(cube, Face::Down);
            apply_unless(cube, done, OLL_ALG)
        }
        Stage::Pll => {
            let done = cube.is_solved();
            apply_unless(cube, done, PLL_ALG)
        }
    }
}

fn apply_unless(cube: &mut Cube, done: bool, alg: &str) -> Vec<Move> {
    if done {
        return Vec::new();
    }
    let moves = parse_lenient(alg);
    cube.apply_all(&moves);
    moves
}

/// One turn of the face holding each white edge sticker that isn't on Up yet. A sticker on
/// Down is lifted with F.
fn cross(cube: &Cube) -> Vec<Move> {
    let white = Color::of_solved(Face::Up);
    Face::ALL
        .into_iter()
        .filter(|face| *face != Face::Up)
        .flat_map(|face| {
            EDGE_CELLS
                .into_iter()
                .filter(move |(row, col)| cube.sticker(face, *row, *col) == white)
                .map(move |_| match face {
                    Face::Down => Move::face(Face::Front, TurnType::Forward),
                    _ => Move::face(face, TurnType::Forward),
                })
        })
        .collect()
}

fn f2l(cube: &mut Cube) -> Vec<Move> {
    let mut moves = Vec::new();
    for slot in &F2L_SLOTS {
        let filled = slot
            .stickers
            .iter()
            .all(|(face, row, col)| cube.sticker(*face, *row, *col) == Color::of_solved(*face));
        if !filled {
            let alg = parse_lenient(slot.alg);
            cube.apply_all(&alg);
            moves.extend(alg);
        }
    }
    moves
}

fn is_face_solved(cube: &Cube, face: Face) -> bool {
    cube.face(face)
        .iter()
        .flatten()
        .all(|color| *color == Color::of_solved(face))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::format_moves;

    #[test]
    fn test_solved_cube_needs_nothing() {
        for stage in Stage::ALL {
            let mut cube = Cube::solved();
            assert!(run(stage, &mut cube).is_empty(), "{stage}");
            assert_eq!(Cube::solved(), cube);
        }
    }

    #[test]
    fn test_cross_turns_faces_holding_white_edges() {
        let mut cube = Cube::solved();
        cube.apply_token("R");
        // R puts white edge stickers on Back (col 0 middle row).
        let moves = run(Stage::Cross, &mut cube);
        assert_eq!("B", format_moves(&moves));
    }

    #[test]
    fn test_oll_applies_fixed_alg_when_down_is_mixed() {
        let mut cube = Cube::solved();
        cube.apply_token("R");
        let mut expected = cube.clone();
        expected.apply_all(&parse_lenient(OLL_ALG));

        assert_eq!(OLL_ALG, format_moves(&run(Stage::Oll, &mut cube)));
        assert_eq!(expected, cube);
    }

    #[test]
    fn test_pll_runs_only_on_unsolved_cube() {
        let mut cube = Cube::solved();
        cube.apply_token("U");
        assert_eq!(PLL_ALG, format_moves(&run(Stage::Pll, &mut cube)));
    }

    #[test]
    fn test_f2l_skips_filled_slots() {
        let mut cube = Cube::solved();
        cube.apply_token("U");
        // U leaves the middle layer alone.
        assert!(run(Stage::F2L, &mut cube).is_empty());

        let mut cube = Cube::solved();
        cube.apply_token("R");
        // Front-left is untouched by R, so the front-right algorithm comes first.
        let moves = format_moves(&run(Stage::F2L, &mut cube));
        assert!(moves.starts_with("U' R U R'"), "{moves}");
    }

    #[test]
    fn test_stage_names() {
        let names: Vec<String> = Stage::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(vec!["Cross", "F2L", "OLL", "PLL"], names);
    }
}
