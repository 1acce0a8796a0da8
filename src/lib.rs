//! Core library surface for the Reading Shelf TUI application.
//!
//! The item model and the `Shelf` collection manager are usable on their own;
//! the `ui` module is a thin Ratatui shell over them.
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod shelf;
pub mod ui;

pub use config::Config;
pub use db::Store;
pub use error::{RecordError, ShelfError, ValidationError};
pub use models::{
    parse_page_count, IdGenerator, ItemDetails, ItemKind, ItemRecord, ReadingItem,
    SequentialIds, UuidGenerator, SHORT_ID_LEN,
};
pub use shelf::{LoadReport, RemoveOutcome, Shelf};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
