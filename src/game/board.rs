use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::GameError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    /// Occupied by the player at this index (0 or 1).
    Taken(usize),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Index of the player occupying this cell, if any
    pub fn player(self) -> Option<usize> {
        match self {
            Cell::Empty => None,
            Cell::Taken(index) => Some(index),
        }
    }
}

/// A board position. Row 0 is the top, the last row is where pieces land first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Coord::new(row, col)
    }
}

/// The playing grid, stored as columns ordered left to right, each column
/// ordered top to bottom.
///
/// A board is a value: placing a piece produces a new board and leaves the
/// original untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    columns: Vec<Vec<Cell>>,
    height: usize,
}

impl Board {
    /// Create a new empty board of the standard 7x6 size
    pub fn new() -> Self {
        Self::with_size(COLS, ROWS)
    }

    /// Create an empty board of arbitrary size.
    ///
    /// Games are always played on the standard grid; other shapes are only
    /// useful for line extraction and diffing.
    pub fn with_size(width: usize, height: usize) -> Self {
        Board {
            columns: vec![vec![Cell::Empty; height]; width],
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.height && coord.col < self.width()
    }

    /// Get the cell at a specific position, `None` when off the board
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.columns.get(col)?.get(row).copied()
    }

    pub fn cell(&self, coord: Coord) -> Option<Cell> {
        self.get(coord.row, coord.col)
    }

    /// Cells of a column, top to bottom
    pub fn column(&self, col: usize) -> Option<&[Cell]> {
        self.columns.get(col).map(Vec::as_slice)
    }

    /// Check if a column is full. Columns off the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        self.landing_row(col).is_none()
    }

    /// Row a piece dropped into `col` would land on
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        self.columns.get(col)?.iter().rposition(|cell| cell.is_empty())
    }

    /// Drop a piece into a column, returning the new board and the row the
    /// piece landed on. Returns `None` if the column is full or missing.
    #[instrument(level = "trace", skip(self))]
    pub fn with_piece(&self, col: usize, cell: Cell) -> Option<(Board, usize)> {
        let row = self.landing_row(col)?;
        let mut board = self.clone();
        board.columns[col][row] = cell;
        Some((board, row))
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells().all(|cell| !cell.is_empty())
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells().filter(|cell| !cell.is_empty()).count()
    }

    /// All cells in flat index order (column by column, top to bottom)
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.columns.iter().flatten().copied()
    }

    /// Flat index of a coordinate: `col * height + row`
    pub fn flat_index(&self, coord: Coord) -> usize {
        coord.col * self.height + coord.row
    }

    /// Inverse of [`Board::flat_index`]
    pub fn coord_of(&self, index: usize) -> Option<Coord> {
        if self.height == 0 {
            return None;
        }
        let coord = Coord::new(index % self.height, index / self.height);
        self.contains(coord).then_some(coord)
    }

    /// Build a board from text rows, top row first. `X` is player 0, `O` is
    /// player 1, anything else is empty.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        let mut board = Board::with_size(width, height);
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                board.columns[col][row] = match ch {
                    'X' => Cell::Taken(0),
                    'O' => Cell::Taken(1),
                    _ => Cell::Empty,
                };
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Flat indexes of every cell that differs between two boards of the same
/// shape, in ascending order.
pub fn diff_boards(before: &Board, after: &Board) -> Result<Vec<usize>, GameError> {
    if before.dimensions() != after.dimensions() {
        return Err(GameError::DimensionMismatch {
            left: before.dimensions(),
            right: after.dimensions(),
        });
    }

    Ok(before
        .cells()
        .zip(after.cells())
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(index, _)| index)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.dimensions(), (COLS, ROWS));
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Some(Cell::Empty));
            }
        }
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_get_off_board() {
        let board = Board::new();
        assert_eq!(board.get(ROWS, 0), None);
        assert_eq!(board.get(0, COLS), None);
    }

    #[test]
    fn test_with_piece_stacks_from_bottom() {
        let board = Board::new();

        let (board, row) = board.with_piece(3, Cell::Taken(0)).unwrap();
        assert_eq!(row, 5);
        assert_eq!(board.get(5, 3), Some(Cell::Taken(0)));

        let (board, row) = board.with_piece(3, Cell::Taken(1)).unwrap();
        assert_eq!(row, 4);
        assert_eq!(board.get(4, 3), Some(Cell::Taken(1)));
    }

    #[test]
    fn test_with_piece_leaves_original_untouched() {
        let original = Board::new();
        let (updated, _) = original.with_piece(0, Cell::Taken(0)).unwrap();
        assert_eq!(original.occupied_count(), 0);
        assert_eq!(updated.occupied_count(), 1);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board = board.with_piece(0, Cell::Taken(1)).unwrap().0;
        }

        assert!(board.is_column_full(0));
        assert!(board.with_piece(0, Cell::Taken(0)).is_none());
        assert!(!board.is_column_full(1));
    }

    #[test]
    fn test_missing_column_counts_as_full() {
        let board = Board::new();
        assert!(board.is_column_full(COLS));
        assert!(board.with_piece(COLS, Cell::Taken(0)).is_none());
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                board = board.with_piece(col, Cell::Taken(0)).unwrap().0;
            }
        }
        assert!(board.is_full());
        assert_eq!(board.occupied_count(), ROWS * COLS);
    }

    #[test]
    fn test_flat_index_is_column_major() {
        let board = Board::new();
        assert_eq!(board.flat_index(Coord::new(0, 0)), 0);
        assert_eq!(board.flat_index(Coord::new(5, 0)), 5);
        assert_eq!(board.flat_index(Coord::new(0, 1)), 6);
        assert_eq!(board.flat_index(Coord::new(5, 6)), 41);
    }

    #[test]
    fn test_coord_of_inverts_flat_index() {
        let board = Board::new();
        for index in 0..ROWS * COLS {
            let coord = board.coord_of(index).unwrap();
            assert_eq!(board.flat_index(coord), index);
        }
        assert_eq!(board.coord_of(ROWS * COLS), None);
    }

    #[test]
    fn test_from_rows() {
        let board = Board::from_rows(&["...", "X..", "XO."]);
        assert_eq!(board.dimensions(), (3, 3));
        assert_eq!(board.get(2, 0), Some(Cell::Taken(0)));
        assert_eq!(board.get(2, 1), Some(Cell::Taken(1)));
        assert_eq!(board.get(0, 0), Some(Cell::Empty));
    }

    #[test]
    fn test_diff_identical_boards_is_empty() {
        let board = Board::from_rows(&["...", "X..", "XO."]);
        assert_eq!(diff_boards(&board, &board).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_diff_reports_changed_flat_indexes() {
        let before = Board::new();
        let (after, _) = before.with_piece(2, Cell::Taken(0)).unwrap();
        let (after, _) = after.with_piece(0, Cell::Taken(1)).unwrap();

        let diff = diff_boards(&before, &after).unwrap();
        assert_eq!(diff, vec![5, 2 * ROWS + 5]);
        assert_eq!(diff_boards(&after, &before).unwrap(), diff);
    }

    #[test]
    fn test_diff_rejects_dimension_mismatch() {
        let err = diff_boards(&Board::new(), &Board::with_size(5, 4)).unwrap_err();
        assert_eq!(
            err,
            GameError::DimensionMismatch {
                left: (7, 6),
                right: (5, 4),
            }
        );
    }
}
