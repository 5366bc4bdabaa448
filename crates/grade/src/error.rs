use std::fmt;

use serde::Serialize;

#[derive(Debug)]
pub enum GradeError {
    /// Grid has fewer than two rows (header + at least one record).
    InsufficientData { rows: usize },
    /// Tier table, color mapping or rule set is malformed.
    Configuration(String),
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Scoring collaborator returned something that is not a score list.
    ScoreResponse(String),
    /// IO error (file read, CSV decode).
    Io(String),
}

impl fmt::Display for GradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientData { rows } => write!(
                f,
                "insufficient data: need a header row and at least one record, got {rows} row(s)"
            ),
            Self::Configuration(msg) => write!(f, "configuration error: {msg}"),
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ScoreResponse(msg) => write!(f, "score response error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for GradeError {}

/// Failure localized to one record. Embedded in the verdict; the batch continues.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowError {
    /// No usable external score was supplied for this row.
    IncompleteScoreData { row: usize },
    /// Score fell below every tier in the table (or was NaN).
    ScoreOutOfRange { row: usize, score: f64 },
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompleteScoreData { row } => {
                write!(f, "row {row}: no score data returned for this record")
            }
            Self::ScoreOutOfRange { row, score } => {
                write!(f, "row {row}: score {score} is not covered by any tier")
            }
        }
    }
}

impl std::error::Error for RowError {}
