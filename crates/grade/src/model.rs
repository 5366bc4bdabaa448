use std::collections::BTreeMap;

use serde::Serialize;

use crate::cell::CellValue;
use crate::error::RowError;
use crate::external::ExternalScore;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Row 0 is the header row, rows 1.. are records. Rows may be ragged.
pub type Grid = Vec<Vec<CellValue>>;

/// How each record gets its verdict.
#[derive(Debug, Clone, Copy)]
pub enum BatchMode<'a> {
    /// Field rules only; rows are valid or invalid.
    LocalValidate,
    /// Scores fetched beforehand, paired with data rows by position.
    ExternalScore(&'a [Option<ExternalScore>]),
    /// Scores computed locally by the heuristic lead scorer.
    Heuristic,
}

impl BatchMode<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LocalValidate => "local_validate",
            Self::ExternalScore(_) => "external_score",
            Self::Heuristic => "heuristic",
        }
    }
}

// ---------------------------------------------------------------------------
// Per-row output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowVerdict {
    /// 1-based within the data block (header excluded).
    pub row: usize,
    pub violations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_action: Option<String>,
    /// Scorer strengths / risk factors, or the external reasoning line.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RowError>,
}

impl RowVerdict {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            violations: Vec::new(),
            score: None,
            tier: None,
            color: None,
            recommendation: None,
            next_action: None,
            notes: Vec::new(),
            insights: None,
            error: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    /// Rows that reached a tier.
    pub total: usize,
    /// Rows carrying a row error; excluded from counts and average.
    pub failed: usize,
    /// Every configured tier, zero counts included.
    pub tier_counts: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,
    pub narrative: String,
}

impl BatchSummary {
    pub fn count(&self, tier: &str) -> usize {
        self.tier_counts.get(tier).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchMeta {
    pub config_name: String,
    pub mode: String,
    pub engine_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub meta: BatchMeta,
    pub summary: BatchSummary,
    pub rows: Vec<RowVerdict>,
}

impl BatchResult {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
