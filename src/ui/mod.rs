//! Terminal UI: renders the board and player status, and drives turns from
//! keyboard input.

mod app;
pub mod game_view;

pub use app::App;
