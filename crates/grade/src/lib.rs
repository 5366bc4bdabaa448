//! `leadgrid-grade` — lead record validation and tier classification engine.
//!
//! Pure engine crate: receives a grid snapshot (header row + records) and
//! returns per-row verdicts plus a batch summary. No network or UI
//! dependencies; the host applies the returned row colors.

pub mod cell;
pub mod config;
pub mod engine;
pub mod error;
pub mod external;
pub mod grid;
pub mod header;
pub mod model;
pub mod presentation;
pub mod rules;
pub mod scoring;
pub mod summary;
pub mod tier;

pub use cell::CellValue;
pub use config::GradeConfig;
pub use engine::run;
pub use error::{GradeError, RowError};
pub use external::{ExternalScore, ScoreRequest};
pub use header::HeaderMap;
pub use model::{BatchMode, BatchResult, BatchSummary, Grid, RowVerdict};
pub use presentation::{color_of, paint_plan, RowPaint};
pub use rules::{validate, FieldFormat, FieldRule};
pub use tier::{Tier, TierTable};
