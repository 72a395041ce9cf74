//! Core business logic, independent of any UI framework.
//!
//! The month lifecycle in [`month`] is the orchestrator; the other modules
//! are the data operations it and the UI layer build on.

/// Bank balance per calendar month, auto-created at zero on first read
pub mod balance;
/// Budget master records and per-month spending figures
pub mod budget;
/// Category master records and the default seed set
pub mod category;
/// Income master records
pub mod income;
/// Paid/received tracking per (entity, month, year)
pub mod ledger;
/// Month initialization and regeneration lifecycle
pub mod month;
/// User preference storage (display language)
pub mod preferences;
/// Recurring expense master records
pub mod recurring;
/// Monthly snapshot rows and the full-store wipe
pub mod snapshot;
/// User-entered expense transactions
pub mod transaction;
