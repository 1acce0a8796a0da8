//! Typed errors the UI needs to tell apart. Storage plumbing stays on
//! `anyhow` and is wrapped once at the shelf boundary.

use thiserror::Error;

/// Input rejected before anything touches storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required.")]
    MissingField(&'static str),
    #[error("Page count must be positive (got {0}).")]
    NonPositivePages(i64),
    #[error("Page count must be a whole number (got '{0}').")]
    InvalidPages(String),
    #[error("Enter an ID or ID prefix to remove.")]
    EmptyPrefix,
}

/// Failure reported by a shelf operation. Whenever one is returned the
/// in-memory collection is exactly as it was before the call.
#[derive(Debug, Error)]
pub enum ShelfError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Why a stored row could not be turned back into an item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("item {id} has unknown kind '{kind}'")]
    UnknownKind { id: String, kind: String },
    #[error("item {id} is missing its {field} value")]
    MissingField { id: String, field: &'static str },
    #[error("item {id} has an unreadable {field} value")]
    InvalidField { id: String, field: &'static str },
}
