// Terminal UI implementation using ratatui
// The gallery page, drawn as a grid of cards

pub mod app;
pub mod help_ui;
pub mod runner;
pub mod ui;

pub use app::{App, InputMode};
pub use runner::run_tui;
