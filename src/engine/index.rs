use std::sync::OnceLock;

/// The number of permutations for a 3x3 grid of cells
const PERMUTATIONS: usize = 1 << 9;
type GameOfLifeIndex = [bool; PERMUTATIONS];

/// Bit of a neighborhood holding the cell itself
///
/// Bits 0..3 are the row above (left to right), 3..6 the cell's own row and
/// 6..9 the row below.
pub(super) const CENTER: usize = 0b000_010_000;

/// Returns a Singleton lookup table for the Game of Life ruleset
///
/// Equivalent to calling [`generate_gol_index`] once and storing the result
pub(super) fn get_gol_index() -> &'static GameOfLifeIndex {
    static CELL: OnceLock<GameOfLifeIndex> = OnceLock::new();
    CELL.get_or_init(generate_gol_index)
}

/// Conway's rule for a single cell
///
/// A live cell survives with 2 or 3 live neighbors, a dead cell is born with
/// exactly 3. Everything else is dead in the next generation.
#[inline]
pub(super) fn next_state(alive: bool, neighbors: u32) -> bool {
    matches!((alive, neighbors), (true, 2) | (_, 3))
}

/// Creates a lookup table for the Game of Life ruleset
///
/// The table is indexed by a 9-bit number representing a cell and its neighbors,
/// see [`CENTER`] for the layout.
///
/// Returns whether the center cell should be alive or dead in its arrangement
pub(super) fn generate_gol_index() -> GameOfLifeIndex {
    let mut indices = [false; PERMUTATIONS];
    for (i, next) in indices.iter_mut().enumerate() {
        let neighbors = (i & !CENTER).count_ones();
        *next = next_state(i & CENTER != 0, neighbors);
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_value(alive: bool, neighbors: usize) -> usize {
        const NEIGHBOR_BITS: [usize; 8] = [
            0b000_000_001,
            0b000_000_010,
            0b000_000_100,
            0b000_001_000,
            0b000_100_000,
            0b001_000_000,
            0b010_000_000,
            0b100_000_000,
        ];

        let mut value = if alive { CENTER } else { 0 };
        for bit in NEIGHBOR_BITS.iter().take(neighbors) {
            value |= bit;
        }
        value
    }

    #[test]
    fn rules_match_conway_life() {
        let index = generate_gol_index();

        for neighbors in 0..=8 {
            let survives = neighbors == 2 || neighbors == 3;
            let born = neighbors == 3;
            assert_eq!(index[grid_value(true, neighbors)], survives, "alive, {neighbors}");
            assert_eq!(index[grid_value(false, neighbors)], born, "dead, {neighbors}");
        }
    }

    #[test]
    fn index_only_depends_on_neighbor_count() {
        let index = generate_gol_index();

        // three neighbors in the bottom row vs. three scattered ones
        assert!(index[0b111_000_000]);
        assert!(index[0b100_001_001]);
        assert!(!index[0b111_000_001 | CENTER]);
    }

    #[test]
    fn singleton_matches_generated() {
        assert_eq!(get_gol_index(), &generate_gol_index());
    }
}
