//! The move grammar: face turns, whole-cube rotations and their modifiers.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use log::debug;
use thiserror::Error;

/// The six faces of the cube, in the order the sticker grid stores them.
#[derive(Clone, Copy, Debug, PartialOrd, Ord, Eq, PartialEq, Hash)]
pub enum Face {
    /// The top face, white when solved.
    Up,
    /// The face towards the solver, green when solved.
    Front,
    /// Red when solved.
    Right,
    /// Orange when solved.
    Left,
    /// The bottom face, yellow when solved.
    Down,
    /// Blue when solved.
    Back,
}

impl Face {
    /// Every face, indexed by `face as usize`.
    pub const ALL: [Self; 6] = [
        Face::Up,
        Face::Front,
        Face::Right,
        Face::Left,
        Face::Down,
        Face::Back,
    ];

    /// The letter used for this face in move notation and in facelet strings.
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Front => 'F',
            Face::Right => 'R',
            Face::Left => 'L',
            Face::Down => 'D',
            Face::Back => 'B',
        }
    }
}

/// Anything a single move token can turn: one face layer or the whole cube about an axis.
#[derive(Clone, Copy, Debug, PartialOrd, Ord, Eq, PartialEq, Hash)]
pub enum Layer {
    /// A single outer layer.
    Face(Face),
    /// Whole cube about the R/L axis, following R.
    X,
    /// Whole cube about the U/D axis, following U.
    Y,
    /// Whole cube about the F/B axis, following F.
    Z,
}

impl Layer {
    /// Looks up a layer from its notation letter, ignoring case.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter.to_ascii_uppercase() {
            'U' => Layer::Face(Face::Up),
            'F' => Layer::Face(Face::Front),
            'R' => Layer::Face(Face::Right),
            'L' => Layer::Face(Face::Left),
            'D' => Layer::Face(Face::Down),
            'B' => Layer::Face(Face::Back),
            'X' => Layer::X,
            'Y' => Layer::Y,
            'Z' => Layer::Z,
            _ => return None,
        })
    }

    /// The uppercase notation letter.
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Layer::Face(face) => face.letter(),
            Layer::X => 'X',
            Layer::Y => 'Y',
            Layer::Z => 'Z',
        }
    }
}

/// All the ways a layer can turn.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum TurnType {
    /// A clockwise quarter turn, written with no suffix.
    Forward,
    /// A counter-clockwise quarter turn, written with `'`.
    Backward,
    /// A half turn, written with `2`.
    Double,
}

impl TurnType {
    /// Clockwise quarter turns this modifier stands for (1, 2 or 3).
    #[must_use]
    pub fn quarter_turns(self) -> u8 {
        match self {
            TurnType::Forward => 1,
            TurnType::Double => 2,
            TurnType::Backward => 3,
        }
    }

    /// Inverse of [`TurnType::quarter_turns`], reduced mod 4. Returns `None` when the turns cancel out.
    #[must_use]
    pub fn from_quarter_turns(quarter_turns: u8) -> Option<Self> {
        match quarter_turns % 4 {
            1 => Some(TurnType::Forward),
            2 => Some(TurnType::Double),
            3 => Some(TurnType::Backward),
            _ => None,
        }
    }

    /// The modifier that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            TurnType::Forward => TurnType::Backward,
            TurnType::Backward => TurnType::Forward,
            TurnType::Double => TurnType::Double,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            TurnType::Forward => "",
            TurnType::Backward => "'",
            TurnType::Double => "2",
        }
    }
}

/// One token of the move grammar.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Move {
    /// What turns.
    pub layer: Layer,
    /// How far it turns.
    pub turn: TurnType,
}

impl Move {
    /// Builds a move from its parts.
    #[must_use]
    pub fn new(layer: Layer, turn: TurnType) -> Self {
        Move { layer, turn }
    }

    /// Shorthand for a turn of one face.
    #[must_use]
    pub fn face(face: Face, turn: TurnType) -> Self {
        Move::new(Layer::Face(face), turn)
    }

    /// The move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        Move::new(self.layer, self.turn.inverse())
    }
}

/// Why a token is not part of the move grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// The token was empty.
    #[error("Empty move token")]
    Empty,
    /// The first character names no face or rotation.
    #[error("Unknown layer '{0}'")]
    UnknownLayer(char),
    /// The characters after the layer letter are not a known modifier.
    #[error("Unknown modifier '{1}' on layer '{0}'")]
    UnknownModifier(char, String),
}

impl FromStr for Move {
    type Err = MoveParseError;

    /// Parses `R`, `r2`, `R'` or `Ri`. The `i` suffix is the older inverse marker, still accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars.next().ok_or(MoveParseError::Empty)?;
        let layer = Layer::from_letter(letter).ok_or(MoveParseError::UnknownLayer(letter))?;

        let turn = match chars.as_str() {
            "" => TurnType::Forward,
            "2" => TurnType::Double,
            "'" | "i" | "I" | "\u{2019}" => TurnType::Backward,
            other => {
                return Err(MoveParseError::UnknownModifier(
                    layer.letter(),
                    other.to_owned(),
                ))
            }
        };

        Ok(Move::new(layer, turn))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.layer.letter(), self.turn.suffix())
    }
}

/// Parses whitespace-separated move text, skipping any token that is not part of the grammar.
///
/// Blank text gives an empty sequence. Skipped tokens are only logged.
#[must_use]
pub fn parse_lenient(text: &str) -> Vec<Move> {
    text.split_whitespace()
        .filter_map(|token| match token.parse::<Move>() {
            Ok(mv) => Some(mv),
            Err(e) => {
                debug!("Ignoring move token {token:?}: {e}");
                None
            }
        })
        .collect()
}

/// Parses whitespace-separated move text up to the first token that is not part of the grammar.
///
/// Returns the moves parsed so far and the offending token, if there was one.
#[must_use]
pub fn parse_until_invalid(text: &str) -> (Vec<Move>, Option<&str>) {
    let mut moves = Vec::new();
    for token in text.split_whitespace() {
        match token.parse::<Move>() {
            Ok(mv) => moves.push(mv),
            Err(_) => return (moves, Some(token)),
        }
    }
    (moves, None)
}

/// Formats moves the way they are written on output: uppercase letters, `'` for inverses.
#[must_use]
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().join(" ")
}

/// Returns the sequence that undoes |moves|: reversed order, every modifier inverted.
#[must_use]
pub fn invert_sequence(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|mv| mv.inverse()).collect()
}
