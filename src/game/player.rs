use serde::{Deserialize, Serialize};

/// Number of players in a game
pub const PLAYER_COUNT: usize = 2;

/// Display identity of a player. Players are referred to on the board by
/// their index in the game's roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub color: String,
}

impl Player {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Player {
            name: name.into(),
            color: color.into(),
        }
    }

    /// The standard roster: "Player 1" in red, "Player 2" in blue
    pub fn default_roster() -> [Player; PLAYER_COUNT] {
        [Player::new("Player 1", "red"), Player::new("Player 2", "blue")]
    }
}

/// Index of the player moving after `index`
pub fn next_player(index: usize) -> usize {
    (index + 1) % PLAYER_COUNT
}
