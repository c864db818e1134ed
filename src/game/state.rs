use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

use super::board::{Board, Cell, Coord};
use super::geometry::{anti_diagonal_line, column_line, diagonal_line, find_subsequence, row_line};
use super::player::{next_player, Player, PLAYER_COUNT};
use crate::error::GameError;

/// Number of consecutive pieces needed to win
pub const WIN_LENGTH: usize = 4;

/// Read-only summary of where a game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won { winner: usize },
    Draw,
}

/// Immutable snapshot of a game.
///
/// Every turn produces a new `GameState`; earlier snapshots stay valid so
/// they can be diffed against later ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    players: [Player; PLAYER_COUNT],
    current_player: usize,
    ended: bool,
    is_board_full: bool,
    winning_cells: Option<Vec<Coord>>,
}

impl GameState {
    /// Create a new game with the default roster. The first player starts.
    pub fn new() -> Self {
        Self::with_players(Player::default_roster())
    }

    /// Create a new game with a custom roster
    pub fn with_players(players: [Player; PLAYER_COUNT]) -> Self {
        GameState {
            board: Board::new(),
            players,
            current_player: 0,
            ended: false,
            is_board_full: false,
            winning_cells: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    pub fn players(&self) -> &[Player; PLAYER_COUNT] {
        &self.players
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player
    }

    /// Get the player whose turn it is (or who just won)
    pub fn current_player(&self) -> Result<&Player, GameError> {
        self.players
            .get(self.current_player)
            .ok_or(GameError::MissingCurrentPlayer {
                index: self.current_player,
                players: self.players.len(),
            })
    }

    /// Player owning the cell at (row, col), if any
    pub fn player_at(&self, row: usize, col: usize) -> Option<&Player> {
        let index = self.board.get(row, col)?.player()?;
        self.players.get(index)
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn is_board_full(&self) -> bool {
        self.is_board_full
    }

    /// The four cells of the winning run, once the game has been won
    pub fn winning_cells(&self) -> Option<&[Coord]> {
        self.winning_cells.as_deref()
    }

    pub fn status(&self) -> GameStatus {
        if !self.ended {
            GameStatus::InProgress
        } else if self.winning_cells.is_some() {
            GameStatus::Won {
                winner: self.current_player,
            }
        } else {
            GameStatus::Draw
        }
    }

    /// Drop the current player's piece into `column` and return the
    /// resulting state.
    ///
    /// Playing on an ended game or into a full column returns an unchanged
    /// copy of `self`. A column off the board is an error.
    #[instrument(level = "debug", skip(self), fields(player = self.current_player))]
    pub fn apply_turn(&self, column: usize) -> Result<GameState, GameError> {
        if self.ended {
            trace!("game has ended, ignoring turn");
            return Ok(self.clone());
        }

        if column >= self.board.width() {
            return Err(GameError::InvalidColumn {
                column,
                width: self.board.width(),
            });
        }

        self.current_player()?;
        let player = self.current_player;

        let Some((board, row)) = self.board.with_piece(column, Cell::Taken(player)) else {
            trace!(column, "column is full, ignoring turn");
            return Ok(self.clone());
        };
        debug!(row, column, "piece placed");

        let winning_cells = find_winning_cells(&board, Coord::new(row, column), player)?;
        let is_board_full = board.is_full();

        let (current_player, ended) = if winning_cells.is_some() {
            info!(player, "game won");
            (player, true)
        } else if is_board_full {
            info!("board full, game drawn");
            (player, true)
        } else {
            (next_player(player), false)
        };

        Ok(GameState {
            board,
            players: self.players.clone(),
            current_player,
            ended,
            is_board_full,
            winning_cells,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Look for a winning run through `at`, checking the row, then the column,
/// then the `\` diagonal, then the `/` diagonal. The first line holding a
/// run determines the reported cells.
fn find_winning_cells(
    board: &Board,
    at: Coord,
    player: usize,
) -> Result<Option<Vec<Coord>>, GameError> {
    let needle = [Cell::Taken(player); WIN_LENGTH];
    let lines = [
        row_line(board, at.row)?,
        column_line(board, at.col)?,
        diagonal_line(board, at.row, at.col)?,
        anti_diagonal_line(board, at.row, at.col)?,
    ];

    Ok(lines
        .iter()
        .find_map(|line| find_subsequence(line, &needle))
        .map(<[Coord]>::to_vec))
}
