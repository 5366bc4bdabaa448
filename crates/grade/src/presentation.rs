use serde::Serialize;

use crate::error::GradeError;
use crate::model::BatchResult;
use crate::tier::Tier;

/// What the host applies to one spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowPaint {
    /// 1-based within the data block (header excluded).
    pub row: usize,
    pub tier: String,
    pub color: String,
}

pub fn color_of(tier: &Tier) -> Result<&str, GradeError> {
    tier.color
        .as_deref()
        .ok_or_else(|| GradeError::Configuration(format!("tier '{}' has no color", tier.name)))
}

/// One paint entry per classified row, in row order. Rows that failed are skipped.
pub fn paint_plan(result: &BatchResult) -> Vec<RowPaint> {
    result
        .rows
        .iter()
        .filter_map(|v| match (&v.tier, &v.color) {
            (Some(tier), Some(color)) => Some(RowPaint {
                row: v.row,
                tier: tier.clone(),
                color: color.clone(),
            }),
            _ => None,
        })
        .collect()
}
