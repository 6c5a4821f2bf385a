use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum BrierError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad delimiter, empty column name, etc.).
    ConfigValidation(String),
    /// A required input file does not exist.
    MissingFile { path: String },
    /// Missing header row, missing required column(s), or a row missing a required field.
    MalformedTable { table: String, reason: String },
    /// Unparseable or out-of-range value. `identifier` names the offending row.
    InvalidValue {
        table: String,
        field: String,
        identifier: String,
        value: String,
        reason: String,
    },
    /// Repeated identifier in the locked predictions table.
    DuplicateKey { table: String, identifier: String },
    /// IO error (file read/write).
    Io { path: String, message: String },
}

impl fmt::Display for BrierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingFile { path } => write!(f, "file not found: {path}"),
            Self::MalformedTable { table, reason } => write!(f, "{table}: {reason}"),
            Self::InvalidValue { table, field, identifier, value, reason } => {
                write!(f, "{table}: {field} for '{identifier}' {reason}: '{value}'")
            }
            Self::DuplicateKey { table, identifier } => {
                write!(f, "{table}: duplicate identifier '{identifier}'")
            }
            Self::Io { path, message } => write!(f, "IO error on {path}: {message}"),
        }
    }
}

impl std::error::Error for BrierError {}
