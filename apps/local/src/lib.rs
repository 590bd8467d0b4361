//! Local store and command surface for the flashcards app.
//!
//! `db` owns the embedded SQLite database, `commands` is what a front end
//! calls, and `cli` drives those commands from a terminal.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod logging;
pub mod reminder;
pub mod state;

pub use config::AppConfig;
pub use db::SqliteRepository;
pub use state::AppState;
