//! # Connect Four
//!
//! A Connect Four rules engine with a terminal front end built on Ratatui.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, line geometry, players, state machine
//! - [`ui`] — Terminal UI: board rendering and the interactive game loop
//! - [`config`] — TOML configuration loading and validation
//! - [`logging`] — Tracing subscriber setup
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod ui;
