//! Ratatui front-end for the reading shelf. The UI only drives `Shelf`
//! operations and renders their results; all persistence rules live below it.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
