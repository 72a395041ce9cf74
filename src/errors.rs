//! Unified error types for `MoneyBook`.
//!
//! All fallible operations in the crate return [`Result`]. Storage failures
//! are wrapped [`sea_orm::DbErr`] values and propagate to the caller
//! unmodified; lookups that merely fail to find something return `Ok(None)`
//! instead of an error.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A month was initialized twice. This is a logic error in the caller,
    /// not a retryable condition.
    #[error("Month {month}/{year} is already initialized")]
    AlreadyInitialized {
        /// Calendar month (1-12)
        month: i32,
        /// Calendar year
        year: i32,
    },

    /// A calendar month outside 1-12 was supplied.
    #[error("Invalid month: {month} (expected 1-12)")]
    InvalidMonth {
        /// The rejected month value
        month: i32,
    },

    /// A day-of-month outside 1-31 was supplied.
    #[error("Invalid day of month: {day} (expected 1-31)")]
    InvalidDayOfMonth {
        /// The rejected day value
        day: i32,
    },

    /// An amount failed validation (e.g. negative where a positive amount is required).
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A master-record field failed domain validation, such as an empty name
    /// or an unknown income category label.
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description of the rejected input
        message: String,
    },

    /// Configuration loading failure.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// Any underlying database read/write failure.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem-level failure (configuration files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
