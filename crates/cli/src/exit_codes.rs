//! CLI Exit Code Registry
//!
//! Single source of truth for `brier` exit codes. Scripts rely on them.
//!
//! | Code | Description                                    |
//! |------|------------------------------------------------|
//! | 0    | Success                                        |
//! | 1    | General error (unspecified)                    |
//! | 2    | CLI usage error (bad args; emitted by clap)    |
//! | 3    | Required input file not found                  |
//! | 4    | Malformed table (no header, missing columns)   |
//! | 5    | Invalid value (probability, outcome, score)    |
//! | 6    | Duplicate identifier in locked predictions     |
//! | 7    | Invalid `brier.toml`                           |
//! | 8    | I/O failure reading or writing a table         |
//!
//! Unmatched or outcome-less rows are warnings in the scored table, never a
//! non-zero exit.

use brier_recon::BrierError;

/// Success - run completed, outputs written.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments. Clap exits with this itself.
#[allow(dead_code)]
pub const EXIT_USAGE: u8 = 2;

pub const EXIT_MISSING_FILE: u8 = 3;

pub const EXIT_MALFORMED_TABLE: u8 = 4;

/// Unparseable or out-of-range probability, outcomeBinary or brierScore.
pub const EXIT_INVALID_VALUE: u8 = 5;

pub const EXIT_DUPLICATE_KEY: u8 = 6;

/// `brier.toml` failed to parse or validate.
pub const EXIT_CONFIG: u8 = 7;

pub const EXIT_IO: u8 = 8;

/// Map an engine error to its exit code.
pub fn brier_exit_code(err: &BrierError) -> u8 {
    match err {
        BrierError::MissingFile { .. } => EXIT_MISSING_FILE,
        BrierError::MalformedTable { .. } => EXIT_MALFORMED_TABLE,
        BrierError::InvalidValue { .. } => EXIT_INVALID_VALUE,
        BrierError::DuplicateKey { .. } => EXIT_DUPLICATE_KEY,
        BrierError::ConfigParse(_) | BrierError::ConfigValidation(_) => EXIT_CONFIG,
        BrierError::Io { .. } => EXIT_IO,
    }
}
