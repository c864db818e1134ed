use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use tracing::{debug, error, info, instrument, warn};

use crate::config::{AppConfig, UiConfig};
use crate::game::{diff_boards, Coord, GameState, GameStatus, Player, PLAYER_COUNT};

pub struct App {
    game_state: GameState,
    roster: [Player; PLAYER_COUNT],
    ui: UiConfig,
    selected_column: usize,
    last_move: Vec<Coord>,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let roster = config.roster();
        App {
            game_state: GameState::with_players(roster.clone()),
            roster,
            ui: config.ui.clone(),
            selected_column: config.ui.start_column,
            last_move: Vec::new(),
            should_quit: false,
            message: None,
        }
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    /// Cells changed by the most recent accepted turn
    pub fn last_move(&self) -> &[Coord] {
        &self.last_move
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        info!("game started");
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        info!("quit requested");
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(self.ui.poll_interval_ms))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.game_state.width() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.reset();
            }
            _ => {}
        }
    }

    fn reset(&mut self) {
        self.game_state = GameState::with_players(self.roster.clone());
        self.selected_column = self.ui.start_column;
        self.last_move.clear();
        self.message = Some("New game started!".to_string());
        info!("new game");
    }

    /// Drop piece in selected column
    #[instrument(level = "debug", skip(self), fields(column = self.selected_column))]
    fn drop_piece(&mut self) {
        if self.game_state.is_ended() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        let next = match self.game_state.apply_turn(self.selected_column) {
            Ok(next) => next,
            Err(err) => {
                error!(error = %err, "turn rejected");
                self.message = Some(err.to_string());
                return;
            }
        };

        if next == self.game_state {
            self.message = Some("Column is full!".to_string());
            return;
        }

        self.last_move = if self.ui.highlight_last_move {
            match diff_boards(self.game_state.board(), next.board()) {
                Ok(indexes) => indexes
                    .into_iter()
                    .filter_map(|index| next.board().coord_of(index))
                    .collect(),
                Err(err) => {
                    warn!(error = %err, "could not diff boards");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        debug!(changed = ?self.last_move, "board updated");

        self.game_state = next;
        self.message = match self.game_state.status() {
            GameStatus::Won { .. } => Some("Press 'r' to play again.".to_string()),
            GameStatus::Draw => Some("No more moves. Press 'r' to play again.".to_string()),
            GameStatus::InProgress => None,
        };
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.game_state,
            self.selected_column,
            &self.last_move,
            &self.message,
        );
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}
