//! Reduces recorded move lists to an equivalent, shortest form without Y rotations.

use crate::moves::{Face, Layer, Move, TurnType};

/// Folds Y rotations into the face letter that follows them and merges adjacent turns of the
/// same layer.
///
/// A Y rotation is never emitted. The quarter turns of any run of Y rotations are added up and
/// the next face turn is relabelled by that many steps (Front→Right→Back→Left→Front, Up and
/// Down untouched). The count then goes back to zero, so only that one face turn is relabelled.
/// A turn that lands on the same layer as the previously emitted one is merged with it, and the
/// two vanish when they cancel. Turns of the same face separated by a different face are left
/// alone. X and Z rotations are passed through as ordinary layers and keep any pending count.
///
/// Sequences without Y rotations keep their effect on the cube exactly.
#[must_use]
pub fn canonicalize(moves: &[Move]) -> Vec<Move> {
    let mut simplified: Vec<Move> = Vec::with_capacity(moves.len());
    let mut frame = 0;

    for mv in moves {
        if mv.layer == Layer::Y {
            frame = (frame + mv.turn.quarter_turns()) % 4;
            continue;
        }

        let current = Move::new(relabel(mv.layer, frame), mv.turn);
        if let Layer::Face(_) = mv.layer {
            frame = 0;
        }
        match simplified.last() {
            Some(prev) if prev.layer == current.layer => {
                let total = prev.turn.quarter_turns() + current.turn.quarter_turns();
                simplified.pop();
                if let Some(turn) = TurnType::from_quarter_turns(total) {
                    simplified.push(Move::new(current.layer, turn));
                }
            }
            _ => simplified.push(current),
        }
    }

    simplified
}

/// The face |frame| clockwise quarter Y rotations carry |layer|'s letter to.
fn relabel(layer: Layer, frame: u8) -> Layer {
    let Layer::Face(mut face) = layer else {
        return layer;
    };
    for _ in 0..frame {
        face = match face {
            Face::Front => Face::Right,
            Face::Right => Face::Back,
            Face::Back => Face::Left,
            Face::Left => Face::Front,
            Face::Up | Face::Down => face,
        };
    }
    Layer::Face(face)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::Cube;
    use crate::moves::{format_moves, parse_lenient};

    const FACES: [&str; 6] = ["U", "F", "R", "L", "D", "B"];
    const WITH_Y: [&str; 7] = ["U", "F", "R", "L", "D", "B", "Y"];

    fn canonical_text(text: &str) -> String {
        format_moves(&canonicalize(&parse_lenient(text)))
    }

    /// Random tokens over |letters| with random modifiers.
    fn random_sequence(rng: &mut fastrand::Rng, letters: &[&str], len: usize) -> Vec<Move> {
        const SUFFIXES: [&str; 3] = ["", "'", "2"];
        (0..len)
            .map(|_| {
                let token = format!(
                    "{}{}",
                    letters[rng.usize(..letters.len())],
                    SUFFIXES[rng.usize(..SUFFIXES.len())]
                );
                token.parse().unwrap()
            })
            .collect()
    }

    #[test]
    fn test_same_face_merges() {
        assert_eq!("R2", canonical_text("R R"));
        assert_eq!("R'", canonical_text("R R R"));
        assert_eq!("", canonical_text("R R R R"));
        assert_eq!("U", canonical_text("U2 U'"));
        assert_eq!("", canonical_text("F' F"));
    }

    #[test]
    fn test_separated_turns_stay() {
        assert_eq!("R U R' U'", canonical_text("R U R' U'"));
        assert_eq!("R L R", canonical_text("R L R"));
    }

    #[test]
    fn test_cancellation_exposes_earlier_turn() {
        assert_eq!("R2", canonical_text("R U U' R"));
        assert_eq!("", canonical_text("F R U U' R' F'"));
    }

    #[test]
    fn test_y_relabels_following_turns() {
        assert_eq!("R", canonical_text("Y F"));
        assert_eq!("B U", canonical_text("Y2 F U"));
        assert_eq!("L D", canonical_text("Y' F D"));
        assert_eq!("R F U", canonical_text("Y F Y Y' F U"));
        assert_eq!("", canonical_text("Y Y2"));
    }

    #[test]
    fn test_y_relabels_only_the_next_turn() {
        assert_eq!("R F", canonical_text("Y F F"));
        assert_eq!("R2", canonical_text("Y F Y F"));
        assert_eq!("B U B", canonical_text("Y2 F U Y2 F"));
        assert_eq!("X R", canonical_text("Y X F"));
    }

    #[test]
    fn test_idempotent() {
        let mut rng = fastrand::Rng::with_seed(7);
        for len in 0..40 {
            let once = canonicalize(&random_sequence(&mut rng, &WITH_Y, len));
            assert_eq!(once, canonicalize(&once));
        }
    }

    #[test]
    fn test_same_final_state_without_y() {
        let mut rng = fastrand::Rng::with_seed(11);
        for len in 0..40 {
            let moves = random_sequence(&mut rng, &FACES, len);

            let mut direct = Cube::solved();
            direct.apply_all(&moves);

            let mut simplified = Cube::solved();
            simplified.apply_all(&canonicalize(&moves));

            assert_eq!(direct, simplified, "{}", format_moves(&moves));
        }
    }

    #[test]
    fn test_never_longer_and_no_adjacent_repeats() {
        let mut rng = fastrand::Rng::with_seed(3);
        for len in 0..40 {
            let moves = random_sequence(&mut rng, &WITH_Y, len);
            let simplified = canonicalize(&moves);
            assert!(simplified.len() <= moves.len());
            assert!(simplified.iter().all(|mv| mv.layer != Layer::Y));
            assert!(simplified.windows(2).all(|w| w[0].layer != w[1].layer));
        }
    }
}
