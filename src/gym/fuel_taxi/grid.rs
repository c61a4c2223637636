use strum::{Display, EnumIter, FromRepr, VariantArray};

/// Grid coordinates as `(row, col)`
pub type Pos = (usize, usize);

pub const NUM_ROWS: usize = 5;
pub const NUM_COLS: usize = 5;
pub const NUM_CELLS: usize = NUM_ROWS * NUM_COLS;

/// The fixed map. `|` is a wall, `:` an open corridor between two cells.
pub const MAP: [&str; 7] = [
    "+---------+",
    "|R: | : :G|",
    "| : | : : |",
    "| : : : : |",
    "| | : | : |",
    "|Y| : |B: |",
    "+---------+",
];

/// Landmark cells, indexed by [`Color`]
pub const LANDMARKS: [Pos; 4] = [(0, 0), (0, 4), (4, 0), (4, 3)];

/// Colors of the four landmarks, in landmark index order
#[derive(EnumIter, VariantArray, FromRepr, Display, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    Red = 0,
    Green = 1,
    Yellow = 2,
    Blue = 3,
}

impl Color {
    /// Letter marking the landmark on the map
    pub fn letter(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Yellow => 'Y',
            Color::Blue => 'B',
        }
    }
}

/// Static description of the taxi map
///
/// Vertical movement is always allowed (clipped at the grid bounds). Horizontal movement
/// is only allowed through the corridors marked `:` in [`MAP`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// `east[row][col]` is true when the boundary east of `col` is open
    east: [[bool; NUM_COLS - 1]; NUM_ROWS],
}

impl Grid {
    pub fn new() -> Self {
        let east = std::array::from_fn(|row| {
            let line = MAP[row + 1].as_bytes();
            std::array::from_fn(|col| line[2 * col + 2] == b':')
        });
        Self { east }
    }

    /// Whether the taxi can move one cell east from `pos`
    pub fn can_move_east(&self, pos: Pos) -> bool {
        let (row, col) = pos;
        col + 1 < NUM_COLS && self.east[row][col]
    }

    /// Whether the taxi can move one cell west from `pos`
    pub fn can_move_west(&self, pos: Pos) -> bool {
        let (row, col) = pos;
        col > 0 && self.east[row][col - 1]
    }

    /// Index of the landmark occupying `pos`, if any
    pub fn landmark_at(&self, pos: Pos) -> Option<usize> {
        LANDMARKS.iter().position(|&l| l == pos)
    }

    pub fn contains(pos: Pos) -> bool {
        pos.0 < NUM_ROWS && pos.1 < NUM_COLS
    }

    /// Every cell of the grid in row-major order
    pub fn cells() -> impl Iterator<Item = Pos> {
        (0..NUM_ROWS).flat_map(|row| (0..NUM_COLS).map(move |col| (row, col)))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corridors_match_map() {
        let grid = Grid::new();
        assert_eq!(
            grid.east,
            [
                [true, false, true, true],
                [true, false, true, true],
                [true, true, true, true],
                [false, true, false, true],
                [false, true, false, true],
            ],
            "Corridor table parsed from map"
        );
    }

    #[test]
    fn horizontal_moves() {
        let grid = Grid::new();
        assert!(grid.can_move_east((0, 0)), "Open corridor east of R");
        assert!(!grid.can_move_east((0, 1)), "Wall east of (0, 1)");
        assert!(!grid.can_move_west((0, 2)), "Same wall seen from the east");
        assert!(!grid.can_move_west((2, 0)), "Outer wall on the west edge");
        assert!(!grid.can_move_east((2, 4)), "Outer wall on the east edge");
        assert!(grid.can_move_west((4, 4)), "Open corridor west of (4, 4)");
    }

    #[test]
    fn landmarks() {
        let grid = Grid::new();
        for color in Color::VARIANTS {
            let pos = LANDMARKS[*color as usize];
            assert_eq!(grid.landmark_at(pos), Some(*color as usize), "{color} landmark found");
            let line = MAP[pos.0 + 1].as_bytes();
            assert_eq!(line[2 * pos.1 + 1] as char, color.letter(), "{color} letter on map");
        }
        assert_eq!(grid.landmark_at((2, 2)), None, "Center is not a landmark");
        assert_eq!(Grid::cells().count(), NUM_CELLS, "All cells enumerated");
    }
}
