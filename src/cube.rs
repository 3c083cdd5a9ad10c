//! The sticker-level cube state and the turns that act on it.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

use crate::moves::{Face, Layer, Move, TurnType};

/// A sticker position on one face: `(row, col)`, rows counted from the edge that touches Up
/// (or Back, for Up itself and Front, for Down).
type Cell = (usize, usize);

/// Sticker cycles for a clockwise quarter turn of a face's own 3x3 grid. Each cycle reads like
/// the bond permutations in cycle notation: every cell takes the color of the cell after it.
const FACE_CYCLES: [[Cell; 4]; 2] = [
    [(0, 0), (2, 0), (2, 2), (0, 2)], // corners
    [(0, 1), (1, 0), (2, 1), (1, 2)], // edges
];

/// A whole-cube rotation: four faces trade places, the two on the axis spin in place.
struct Rotation {
    /// `cycle[i]` takes the stickers of `cycle[i + 1]` (wrapping), spun clockwise by `cycle[i]`'s
    /// count of quarter turns.
    cycle: [(Face, u8); 4],
    /// The face the rotation follows.
    clockwise: Face,
    /// The face opposite to `clockwise`.
    counter_clockwise: Face,
}

lazy_static! {
    /// Each entry describes one clockwise quarter rotation of the whole cube.
    static ref ROTATIONS: HashMap<Layer, Rotation> = HashMap::from([
        (Layer::X, Rotation {
            cycle: [(Face::Up, 0), (Face::Front, 0), (Face::Down, 2), (Face::Back, 2)],
            clockwise: Face::Right,
            counter_clockwise: Face::Left,
        }),
        (Layer::Y, Rotation {
            cycle: [(Face::Front, 0), (Face::Right, 0), (Face::Back, 0), (Face::Left, 0)],
            clockwise: Face::Up,
            counter_clockwise: Face::Down,
        }),
        (Layer::Z, Rotation {
            cycle: [(Face::Up, 1), (Face::Left, 1), (Face::Down, 1), (Face::Right, 1)],
            clockwise: Face::Front,
            counter_clockwise: Face::Back,
        }),
    ]);

    /// Maps each face other than Up to the rotation that brings it to the Up position and the
    /// rotation that puts it back.
    static ref SETUPS: HashMap<Face, (Move, Move)> = HashMap::from([
        (Face::Front, (Move::new(Layer::X, TurnType::Forward), Move::new(Layer::X, TurnType::Backward))),
        (Face::Right, (Move::new(Layer::Z, TurnType::Backward), Move::new(Layer::Z, TurnType::Forward))),
        (Face::Left, (Move::new(Layer::Z, TurnType::Forward), Move::new(Layer::Z, TurnType::Backward))),
        (Face::Down, (Move::new(Layer::X, TurnType::Double), Move::new(Layer::X, TurnType::Double))),
        (Face::Back, (Move::new(Layer::X, TurnType::Backward), Move::new(Layer::X, TurnType::Forward))),
    ]);
}

/// The six sticker colors.
#[derive(Clone, Copy, Debug, PartialOrd, Ord, Eq, PartialEq, Hash)]
pub enum Color {
    /// Solved color of Up.
    White,
    /// Solved color of Front.
    Green,
    /// Solved color of Right.
    Red,
    /// Solved color of Left.
    Orange,
    /// Solved color of Down.
    Yellow,
    /// Solved color of Back.
    Blue,
}

impl Color {
    /// Every color, in the same order as [`Face::ALL`].
    pub const ALL: [Self; 6] = [
        Color::White,
        Color::Green,
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Blue,
    ];

    /// The color |face| shows when the cube is solved.
    #[must_use]
    pub fn of_solved(face: Face) -> Self {
        Color::ALL[face as usize]
    }

    /// Single-character label, as shown in the printed net.
    #[must_use]
    pub fn label(self) -> char {
        match self {
            Color::White => 'W',
            Color::Green => 'G',
            Color::Red => 'R',
            Color::Orange => 'O',
            Color::Yellow => 'Y',
            Color::Blue => 'B',
        }
    }
}

/// One face's stickers, `[row][col]`.
pub type FaceGrid = [[Color; 3]; 3];

/// A 3x3x3 cube as 54 stickers. Created solved; every move mutates it in place.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cube {
    stickers: [FaceGrid; 6],
}

impl Default for Cube {
    fn default() -> Self {
        Self::solved()
    }
}

impl Cube {
    /// A solved cube, one color per face.
    #[must_use]
    pub fn solved() -> Self {
        Cube {
            stickers: Color::ALL.map(|color| [[color; 3]; 3]),
        }
    }

    pub(crate) fn from_stickers(stickers: [FaceGrid; 6]) -> Self {
        Cube { stickers }
    }

    /// The stickers of one face.
    #[must_use]
    pub fn face(&self, face: Face) -> &FaceGrid {
        &self.stickers[face as usize]
    }

    /// The color at |row|, |col| of |face|.
    #[must_use]
    pub fn sticker(&self, face: Face, row: usize, col: usize) -> Color {
        self.stickers[face as usize][row][col]
    }

    /// How many stickers of each color are on the cube, indexed like [`Color::ALL`].
    #[must_use]
    pub fn color_counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for color in self.stickers.iter().flatten().flatten() {
            counts[*color as usize] += 1;
        }
        counts
    }

    /// Whether every face is a single color. Orientation doesn't matter.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.stickers
            .iter()
            .all(|grid| grid.iter().flatten().all(|color| *color == grid[1][1]))
    }

    /// Applies one move. Never fails.
    pub fn apply(&mut self, mv: Move) {
        for _ in 0..mv.turn.quarter_turns() {
            self.quarter_turn(mv.layer);
        }
    }

    /// Applies moves in order.
    pub fn apply_all<'a>(&mut self, moves: impl IntoIterator<Item = &'a Move>) {
        for mv in moves {
            self.apply(*mv);
        }
    }

    /// Applies a single textual token. Tokens outside the grammar do nothing.
    pub fn apply_token(&mut self, token: &str) {
        if let Ok(mv) = token.parse() {
            self.apply(mv);
        }
    }

    fn quarter_turn(&mut self, layer: Layer) {
        match layer {
            Layer::Face(Face::Up) => self.turn_up(),
            Layer::Face(face) => {
                let (setup, undo) = SETUPS[&face];
                self.apply(setup);
                self.turn_up();
                self.apply(undo);
            }
            Layer::X | Layer::Y | Layer::Z => self.rotate(&ROTATIONS[&layer]),
        }
    }

    /// The one real layer turn: Up clockwise, carrying the top rows of the side faces with it.
    ///
    /// Seen from above the stickers travel Front→Left→Back→Right, so Front takes Right's row.
    /// Two-phase solvers use this direction and their answers only solve the cube with it;
    /// turning the rows the other way would make U counter-clockwise.
    fn turn_up(&mut self) {
        self.rotate_face_clockwise(Face::Up);

        let [front, right, back, left] =
            [Face::Front, Face::Right, Face::Back, Face::Left].map(|face| face as usize);
        let front_row = self.stickers[front][0];
        self.stickers[front][0] = self.stickers[right][0];
        self.stickers[right][0] = self.stickers[back][0];
        self.stickers[back][0] = self.stickers[left][0];
        self.stickers[left][0] = front_row;
    }

    fn rotate(&mut self, rotation: &Rotation) {
        let old = self.stickers;
        for i in 0..4 {
            let (target, spins) = rotation.cycle[i];
            let (source, _) = rotation.cycle[(i + 1) % 4];
            let mut grid = old[source as usize];
            for _ in 0..spins {
                grid = rotated_clockwise(&grid);
            }
            self.stickers[target as usize] = grid;
        }

        self.rotate_face_clockwise(rotation.clockwise);
        for _ in 0..3 {
            self.rotate_face_clockwise(rotation.counter_clockwise);
        }
    }

    fn rotate_face_clockwise(&mut self, face: Face) {
        let grid = &mut self.stickers[face as usize];
        for cycle in &FACE_CYCLES {
            let (r, c) = cycle[0];
            let start = grid[r][c];
            for i in 0..cycle.len() - 1 {
                let (to_r, to_c) = cycle[i];
                let (from_r, from_c) = cycle[i + 1];
                grid[to_r][to_c] = grid[from_r][from_c];
            }
            let (r, c) = cycle[cycle.len() - 1];
            grid[r][c] = start;
        }
    }
}

impl fmt::Display for Cube {
    /// Unfolded net: Up on top, then Left, Front, Right and Back side by side, then Down.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = |face: Face, r: usize| -> String {
            self.face(face)[r].iter().map(|color| color.label()).collect()
        };
        for r in 0..3 {
            writeln!(f, "    {}", row(Face::Up, r))?;
        }
        for r in 0..3 {
            let sides = [Face::Left, Face::Front, Face::Right, Face::Back].map(|face| row(face, r));
            writeln!(f, "{}", sides.join(" "))?;
        }
        for r in 0..3 {
            writeln!(f, "    {}", row(Face::Down, r))?;
        }
        Ok(())
    }
}

/// Returns a copy of |grid| turned a quarter clockwise.
fn rotated_clockwise(grid: &FaceGrid) -> FaceGrid {
    let mut out = *grid;
    for (r, row) in out.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = grid[2 - c][r];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{invert_sequence, parse_lenient};

    fn after(text: &str) -> Cube {
        let mut cube = Cube::solved();
        cube.apply_all(&parse_lenient(text));
        cube
    }

    fn all_layers() -> Vec<Layer> {
        let mut layers: Vec<Layer> = Face::ALL.into_iter().map(Layer::Face).collect();
        layers.extend([Layer::X, Layer::Y, Layer::Z]);
        layers
    }

    #[test]
    fn test_quarter_turn_has_order_four() {
        let start = after("R U2 F' L D B2 U'");
        for layer in all_layers() {
            let mut cube = start.clone();
            for _ in 0..4 {
                cube.apply(Move::new(layer, TurnType::Forward));
            }
            assert_eq!(start, cube, "{layer:?}");
        }
    }

    #[test]
    fn test_inverse_three_times_is_forward() {
        let start = after("F2 D' L B U R2");
        for layer in all_layers() {
            let mut once = start.clone();
            once.apply(Move::new(layer, TurnType::Forward));

            let mut thrice = start.clone();
            for _ in 0..3 {
                thrice.apply(Move::new(layer, TurnType::Backward));
            }
            assert_eq!(once, thrice, "{layer:?}");
        }
    }

    #[test]
    fn test_colors_are_conserved() {
        let cube = after("R U F' L2 D B' X Y2 Z' U R' F2 D2 L' B");
        assert_eq!([9; 6], cube.color_counts());
        assert!(!cube.is_solved());
    }

    #[test]
    fn test_sexy_move_has_order_six() {
        let mut cube = Cube::solved();
        for i in 1..=6 {
            cube.apply_all(&parse_lenient("R U R' U'"));
            assert_eq!(i == 6, cube == Cube::solved());
        }
    }

    #[test]
    fn test_ru_has_order_105() {
        let mut cube = Cube::solved();
        for _ in 0..105 {
            cube.apply_all(&parse_lenient("R U"));
        }
        assert_eq!(Cube::solved(), cube);
    }

    #[test]
    fn test_conjugating_by_y_relabels_faces() {
        assert_eq!(after("R"), after("Y F Y'"));
        assert_eq!(after("B"), after("Y R Y'"));
        assert_eq!(after("L"), after("Y' F Y"));
        assert_eq!(after("B"), after("Y2 F Y2"));
        assert_eq!(after("D"), after("Z2 U Z2"));
    }

    #[test]
    fn test_scramble_then_inverse_is_solved() {
        let scramble = parse_lenient("D2 F' R U2 L' B D R2 F U' L2 B'");
        let mut cube = Cube::solved();
        cube.apply_all(&scramble);
        cube.apply_all(&invert_sequence(&scramble));
        assert_eq!(Cube::solved(), cube);
    }

    #[test]
    fn test_u_moves_front_row_to_left() {
        let cube = after("U");
        assert_eq!([Color::Red; 3], cube.face(Face::Front)[0]);
        assert_eq!([Color::Blue; 3], cube.face(Face::Right)[0]);
        assert_eq!([Color::Orange; 3], cube.face(Face::Back)[0]);
        assert_eq!([Color::Green; 3], cube.face(Face::Left)[0]);
        assert_eq!([Color::Green; 3], cube.face(Face::Front)[1]);
        assert_eq!(&[[Color::White; 3]; 3], cube.face(Face::Up));
    }

    #[test]
    fn test_r_moves_front_column_to_up() {
        let cube = after("R");
        for row in 0..3 {
            assert_eq!(Color::Green, cube.sticker(Face::Up, row, 2));
            assert_eq!(Color::Yellow, cube.sticker(Face::Front, row, 2));
            assert_eq!(Color::Blue, cube.sticker(Face::Down, row, 2));
            assert_eq!(Color::White, cube.sticker(Face::Back, row, 0));
        }
    }

    #[test]
    fn test_rotations_keep_cube_solved() {
        let cube = after("X Y' Z2 X' Z");
        assert!(cube.is_solved());
        assert_ne!(Cube::solved(), cube);
    }

    #[test]
    fn test_unknown_token_is_noop() {
        let mut cube = after("R U");
        let before = cube.clone();
        cube.apply_token("Q");
        cube.apply_token("R3");
        cube.apply_token("");
        assert_eq!(before, cube);
    }

    #[test]
    fn test_net_display() {
        let mut expected = "    WWW\n".repeat(3);
        expected.push_str(&"OOO GGG RRR BBB\n".repeat(3));
        expected.push_str(&"    YYY\n".repeat(3));
        assert_eq!(expected, Cube::solved().to_string());

        let net = after("U").to_string();
        let lines: Vec<&str> = net.lines().collect();
        assert_eq!("GGG RRR BBB OOO", lines[3]);
        assert_eq!("OOO GGG RRR BBB", lines[4]);
    }

    #[test]
    fn test_rotate_face_clockwise_matches_grid_rotation() {
        let mut cube = after("F R");
        let expected = rotated_clockwise(cube.face(Face::Up));
        cube.rotate_face_clockwise(Face::Up);
        assert_eq!(&expected, cube.face(Face::Up));
    }
}
