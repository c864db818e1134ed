//! Straight-line extraction over the board and run search within a line.

use serde::{Deserialize, Serialize};

use super::board::{Board, Cell, Coord};
use crate::error::GameError;

/// A per-step coordinate delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Direction {
    pub d_row: isize,
    pub d_col: isize,
}

impl Direction {
    /// Horizontal, left to right
    pub const RIGHT: Direction = Direction::new(0, 1);
    /// Vertical, top to bottom
    pub const DOWN: Direction = Direction::new(1, 0);
    /// Diagonal `\`, top-left to bottom-right
    pub const DOWN_RIGHT: Direction = Direction::new(1, 1);
    /// Diagonal `/`, bottom-left to top-right
    pub const UP_RIGHT: Direction = Direction::new(-1, 1);

    pub const fn new(d_row: isize, d_col: isize) -> Self {
        Direction { d_row, d_col }
    }

    /// Apply one step. Returns `None` if either component would go negative.
    pub fn apply(self, coord: Coord) -> Option<Coord> {
        Some(Coord::new(
            coord.row.checked_add_signed(self.d_row)?,
            coord.col.checked_add_signed(self.d_col)?,
        ))
    }
}

/// An ordered run of cells along with the coordinate of each one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    cells: Vec<Cell>,
    coords: Vec<Coord>,
}

impl Sequence {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn push(&mut self, coord: Coord, cell: Cell) {
        self.cells.push(cell);
        self.coords.push(coord);
    }
}

/// Walk from `start` by `step` until reaching `end`, collecting each cell.
///
/// The walk also stops at the edge of the board, after `max(width, height)`
/// cells, or as soon as a step fails to move, so an unreachable `end` or a
/// zero step still terminates. The start cell is always the first element.
pub fn extract_line(
    board: &Board,
    start: Coord,
    step: Direction,
    end: Coord,
) -> Result<Sequence, GameError> {
    if !board.contains(start) {
        return Err(GameError::OutOfBounds {
            row: start.row,
            col: start.col,
        });
    }

    let limit = board.width().max(board.height());
    let mut sequence = Sequence::default();
    let mut next = Some(start);

    while let Some(coord) = next {
        let Some(cell) = board.cell(coord) else {
            break;
        };
        sequence.push(coord, cell);
        if coord == end || sequence.len() >= limit {
            break;
        }
        next = step.apply(coord).filter(|&moved| moved != coord);
    }

    Ok(sequence)
}

/// The full horizontal line at `row`
pub fn row_line(board: &Board, row: usize) -> Result<Sequence, GameError> {
    let last_col = board.width().saturating_sub(1);
    extract_line(
        board,
        Coord::new(row, 0),
        Direction::RIGHT,
        Coord::new(row, last_col),
    )
}

/// The full vertical line at `col`, top to bottom
pub fn column_line(board: &Board, col: usize) -> Result<Sequence, GameError> {
    let last_row = board.height().saturating_sub(1);
    extract_line(
        board,
        Coord::new(0, col),
        Direction::DOWN,
        Coord::new(last_row, col),
    )
}

/// The `\` diagonal through (row, col), from its top-left end to its
/// bottom-right end
pub fn diagonal_line(board: &Board, row: usize, col: usize) -> Result<Sequence, GameError> {
    ensure_on_board(board, row, col)?;
    let last_row = board.height() - 1;
    let last_col = board.width() - 1;

    let back = row.min(col);
    let forward = (last_row - row).min(last_col - col);

    extract_line(
        board,
        Coord::new(row - back, col - back),
        Direction::DOWN_RIGHT,
        Coord::new(row + forward, col + forward),
    )
}

/// The `/` diagonal through (row, col), from its bottom-left end to its
/// top-right end
pub fn anti_diagonal_line(board: &Board, row: usize, col: usize) -> Result<Sequence, GameError> {
    ensure_on_board(board, row, col)?;
    let last_row = board.height() - 1;
    let last_col = board.width() - 1;

    let back = (last_row - row).min(col);
    let forward = row.min(last_col - col);

    extract_line(
        board,
        Coord::new(row + back, col - back),
        Direction::UP_RIGHT,
        Coord::new(row - forward, col + forward),
    )
}

/// Find the first run of `needle` inside `haystack` and return the
/// coordinates it occupies.
pub fn find_subsequence<'a>(haystack: &'a Sequence, needle: &[Cell]) -> Option<&'a [Coord]> {
    if needle.is_empty() {
        return Some(&haystack.coords[..0]);
    }

    let start = haystack
        .cells
        .windows(needle.len())
        .position(|window| window == needle)?;
    Some(&haystack.coords[start..start + needle.len()])
}

fn ensure_on_board(board: &Board, row: usize, col: usize) -> Result<(), GameError> {
    if board.contains(Coord::new(row, col)) {
        Ok(())
    } else {
        Err(GameError::OutOfBounds { row, col })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::{COLS, ROWS};

    fn coords(pairs: &[(usize, usize)]) -> Vec<Coord> {
        pairs.iter().copied().map(Coord::from).collect()
    }

    #[test]
    fn test_direction_apply_underflow() {
        assert_eq!(Direction::UP_RIGHT.apply(Coord::new(0, 3)), None);
        assert_eq!(
            Direction::UP_RIGHT.apply(Coord::new(5, 0)),
            Some(Coord::new(4, 1))
        );
    }

    #[test]
    fn test_row_line_spans_width() {
        let board = Board::new();
        let line = row_line(&board, 5).unwrap();
        assert_eq!(line.len(), COLS);
        assert_eq!(line.coords()[0], Coord::new(5, 0));
        assert_eq!(line.coords()[COLS - 1], Coord::new(5, COLS - 1));
    }

    #[test]
    fn test_column_line_spans_height() {
        let board = Board::new();
        let line = column_line(&board, 2).unwrap();
        assert_eq!(line.len(), ROWS);
        assert_eq!(line.coords()[0], Coord::new(0, 2));
        assert_eq!(line.coords()[ROWS - 1], Coord::new(ROWS - 1, 2));
    }

    #[test]
    fn test_lines_reject_off_board_indexes() {
        let board = Board::new();
        assert_eq!(
            row_line(&board, ROWS).unwrap_err(),
            GameError::OutOfBounds { row: ROWS, col: 0 }
        );
        assert!(column_line(&board, COLS).is_err());
        assert!(diagonal_line(&board, 0, COLS).is_err());
        assert!(anti_diagonal_line(&board, ROWS, 0).is_err());
    }

    #[test]
    fn test_diagonal_line_is_clipped() {
        let board = Board::new();
        let line = diagonal_line(&board, 2, 3).unwrap();
        assert_eq!(
            line.coords(),
            coords(&[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6)]).as_slice()
        );
    }

    #[test]
    fn test_anti_diagonal_line_is_clipped() {
        let board = Board::new();
        let line = anti_diagonal_line(&board, 3, 2).unwrap();
        assert_eq!(
            line.coords(),
            coords(&[(5, 0), (4, 1), (3, 2), (2, 3), (1, 4), (0, 5)]).as_slice()
        );
    }

    #[test]
    fn test_corner_diagonals_are_single_cells() {
        let board = Board::new();
        let line = diagonal_line(&board, 0, COLS - 1).unwrap();
        assert_eq!(line.coords(), &[Coord::new(0, COLS - 1)]);

        let line = anti_diagonal_line(&board, 0, 0).unwrap();
        assert_eq!(line.coords(), &[Coord::new(0, 0)]);
    }

    #[test]
    fn test_extract_line_includes_start() {
        let board = Board::new();
        let start = Coord::new(1, 1);
        let line = extract_line(&board, start, Direction::RIGHT, start).unwrap();
        assert_eq!(line.coords(), &[start]);
        assert_eq!(line.cells(), &[Cell::Empty]);
    }

    #[test]
    fn test_extract_line_stops_at_edge_when_end_unreachable() {
        let board = Board::new();
        let line = extract_line(
            &board,
            Coord::new(0, 0),
            Direction::DOWN_RIGHT,
            Coord::new(0, 6),
        )
        .unwrap();
        assert_eq!(line.len(), 6);
        assert_eq!(line.coords()[5], Coord::new(5, 5));
    }

    #[test]
    fn test_extract_line_zero_step_yields_start_only() {
        let board = Board::new();
        let line = extract_line(
            &board,
            Coord::new(2, 2),
            Direction::new(0, 0),
            Coord::new(3, 3),
        )
        .unwrap();
        assert_eq!(line.coords(), &[Coord::new(2, 2)]);
        assert!(line.len() <= ROWS.min(COLS));
    }

    #[test]
    fn test_extract_line_rejects_off_board_start() {
        let board = Board::new();
        let err = extract_line(
            &board,
            Coord::new(ROWS, 0),
            Direction::RIGHT,
            Coord::new(ROWS, 6),
        )
        .unwrap_err();
        assert_eq!(err, GameError::OutOfBounds { row: ROWS, col: 0 });
    }

    #[test]
    fn test_degenerate_board_line() {
        let board = Board::with_size(1, 1);
        let line = diagonal_line(&board, 0, 0).unwrap();
        assert_eq!(line.len(), 1);
        assert_eq!(find_subsequence(&line, &[Cell::Empty; 4]), None);
    }

    #[test]
    fn test_find_subsequence() {
        let board = Board::from_rows(&[".......", "OXXXX.."]);
        let line = row_line(&board, 1).unwrap();

        let found = find_subsequence(&line, &[Cell::Taken(0); 4]).unwrap();
        assert_eq!(found, coords(&[(1, 1), (1, 2), (1, 3), (1, 4)]).as_slice());

        assert_eq!(find_subsequence(&line, &[Cell::Taken(1); 2]), None);
    }

    #[test]
    fn test_find_subsequence_returns_first_match() {
        let board = Board::from_rows(&["XX.XX.."]);
        let line = row_line(&board, 0).unwrap();
        let found = find_subsequence(&line, &[Cell::Taken(0); 2]).unwrap();
        assert_eq!(found, coords(&[(0, 0), (0, 1)]).as_slice());
    }

    #[test]
    fn test_find_subsequence_does_not_confuse_empty_cells() {
        let board = Board::from_rows(&["...O..."]);
        let line = row_line(&board, 0).unwrap();
        assert_eq!(find_subsequence(&line, &[Cell::Taken(0); 3]), None);
        assert!(find_subsequence(&line, &[Cell::Empty; 3]).is_some());
    }

    #[test]
    fn test_find_subsequence_longer_needle() {
        let board = Board::from_rows(&["XX"]);
        let line = row_line(&board, 0).unwrap();
        assert_eq!(find_subsequence(&line, &[Cell::Taken(0); 4]), None);
        assert_eq!(find_subsequence(&line, &[]), Some(&[][..]));
    }
}
