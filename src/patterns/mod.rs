//! Well-known automata for seeding a board.

mod rle;

pub use self::rle::decode_rle;
use crate::{Cell, PatternError};

const GLIDER: [(usize, usize); 5] = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];

const LIGHT_WEIGHT_SPACE_SHIP: [(usize, usize); 9] = [
    (0, 0),
    (0, 3),
    (1, 4),
    (2, 0),
    (2, 4),
    (3, 4),
    (3, 3),
    (3, 2),
    (3, 1),
];

#[rustfmt::skip]
const GLIDER_GUN: [(usize, usize); 36] = [
    (0, 24),
    (1, 22), (1, 24),
    (2, 12), (2, 13), (2, 20), (2, 21), (2, 34), (2, 35),
    (3, 11), (3, 15), (3, 20), (3, 21), (3, 34), (3, 35),
    (4, 0), (4, 1), (4, 10), (4, 16), (4, 20), (4, 21),
    (5, 0), (5, 1), (5, 10), (5, 14), (5, 16), (5, 17), (5, 22), (5, 24),
    (6, 10), (6, 16), (6, 24),
    (7, 11), (7, 15),
    (8, 12), (8, 13),
];

fn from_offsets(offsets: &[(usize, usize)], origin: Cell) -> Result<Vec<Cell>, PatternError> {
    let cells: Vec<Cell> = offsets.iter().map(|&offset| Cell::from(offset)).collect();
    place(&cells, origin)
}

/// Offsets every cell of a pattern by `origin`
///
/// Fails if any placed cell would not be representable.
pub fn place(cells: &[Cell], origin: Cell) -> Result<Vec<Cell>, PatternError> {
    cells
        .iter()
        .map(|&cell| {
            origin.checked_add(cell).ok_or(PatternError::Placement {
                row: origin.row,
                column: origin.column,
            })
        })
        .collect()
}

/// A glider heading down and to the right, with its bounding box at `origin`
pub fn glider(origin: Cell) -> Result<Vec<Cell>, PatternError> {
    from_offsets(&GLIDER, origin)
}

/// A light-weight spaceship heading right, with its bounding box at `origin`
pub fn light_weight_space_ship(origin: Cell) -> Result<Vec<Cell>, PatternError> {
    from_offsets(&LIGHT_WEIGHT_SPACE_SHIP, origin)
}

/// Gosper's glider gun, with its bounding box at `origin`
///
/// Emits a glider every 30 generations.
pub fn glider_gun(origin: Cell) -> Result<Vec<Cell>, PatternError> {
    from_offsets(&GLIDER_GUN, origin)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Glider,
    LightWeightSpaceShip,
    GliderGun,
}
impl Pattern {
    pub const ALL: [Pattern; 3] = [Self::Glider, Self::LightWeightSpaceShip, Self::GliderGun];

    pub fn from_name<S: AsRef<str>>(name: S) -> Option<Self> {
        match name.as_ref() {
            "glider" => Some(Self::Glider),
            "lwss" => Some(Self::LightWeightSpaceShip),
            "glider-gun" | "gun" => Some(Self::GliderGun),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Glider => "glider",
            Self::LightWeightSpaceShip => "lwss",
            Self::GliderGun => "glider-gun",
        }
    }

    /// Rows and columns spanned by the pattern
    pub fn size(self) -> (usize, usize) {
        match self {
            Self::Glider => (3, 3),
            Self::LightWeightSpaceShip => (4, 5),
            Self::GliderGun => (9, 36),
        }
    }

    pub fn cells(self, origin: Cell) -> Result<Vec<Cell>, PatternError> {
        match self {
            Self::Glider => glider(origin),
            Self::LightWeightSpaceShip => light_weight_space_ship(origin),
            Self::GliderGun => glider_gun(origin),
        }
    }
}
