//! Unified application error type.
//! Every layer (db, store plumbing, cli, export) returns AppError so the
//! binary has a single place where failures are reported.
//!
//! The trip store itself never fails: guarded mutations are no-ops and a bad
//! import payload is reported as `false`. AppError covers the I/O around it.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unsupported currency: {0}")]
    InvalidCurrency(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("Trip not found: {0}")]
    TripNotFound(String),

    #[error("Day not found: {0}")]
    DayNotFound(String),

    #[error("Activity not found: {0}")]
    ActivityNotFound(String),

    #[error("Owner not found: {0}")]
    OwnerNotFound(String),

    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),

    #[error("Missing exchange rate for {0}")]
    MissingRate(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Import / export errors
    // ---------------------------
    #[error("Import failed: {0}")]
    Import(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
