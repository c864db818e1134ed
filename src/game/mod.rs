//! Core Connect Four rules: board representation, line geometry, players,
//! and the game state machine with immutable transitions.

mod board;
pub mod geometry;
mod player;
mod state;

pub use board::{diff_boards, Board, Cell, Coord, COLS, ROWS};
pub use geometry::{
    anti_diagonal_line, column_line, diagonal_line, extract_line, find_subsequence, row_line,
    Direction, Sequence,
};
pub use player::{next_player, Player, PLAYER_COUNT};
pub use state::{GameState, GameStatus, WIN_LENGTH};
