//! Unified application error type.
//! All modules (store, sync, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

/// Local validation failures of the copy-from-previous actions.
///
/// They never touch the document: the action is aborted and the message is
/// shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("Previous cell not filled in")]
    NoPreviousCell,

    #[error("Previous page title not filled in")]
    NoPreviousPage,

    #[error("Previous cell not filled in")]
    SourceEmpty,
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database / serialization
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    // ---------------------------
    // Backend errors
    // ---------------------------
    #[error("Anonymous sign-in failed: {0}")]
    AuthFailure(String),

    #[error("Live document channel failed: {0}")]
    SubscriptionFailure(String),

    #[error("Save failed: {0}")]
    WriteFailure(String),

    // ---------------------------
    // User input
    // ---------------------------
    #[error("{0}")]
    UserInput(#[from] InputError),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
