//! `brier-recon` — Locked-forecast reconciliation and Brier scoring.
//!
//! Loads locked predictions and observed outcomes, joins them by identifier,
//! scores each joined row and renders the derived tables. `engine::run` is the
//! only entry point that touches the filesystem.

pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod model;
pub mod scorer;
pub mod summary;
pub mod table;
pub mod writer;

pub use config::BrierConfig;
pub use engine::{run, RunReport};
pub use error::BrierError;
pub use model::{LockedBook, LockedPrediction, OutcomeRecord, ScoreStatus, ScoreSummary, ScoredRow};
pub use table::{RawRow, Table};
