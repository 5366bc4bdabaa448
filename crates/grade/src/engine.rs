use crate::config::GradeConfig;
use crate::error::{GradeError, RowError};
use crate::external::ExternalScore;
use crate::header::HeaderMap;
use crate::model::{BatchMeta, BatchMode, BatchResult, Grid, RowVerdict};
use crate::presentation::color_of;
use crate::rules::validate;
use crate::scoring::score_record;
use crate::summary::compute_summary;
use crate::tier::TierTable;

/// Grade one grid snapshot. Returns per-row verdicts + summary.
///
/// Field violations are always reported. In `LocalValidate` mode they decide
/// the tier (valid/invalid); in the scored modes the score does.
pub fn run(config: &GradeConfig, grid: &Grid, mode: BatchMode<'_>) -> Result<BatchResult, GradeError> {
    if grid.len() < 2 {
        return Err(GradeError::InsufficientData { rows: grid.len() });
    }

    let header_row = &grid[0];
    let data = &grid[1..];
    log::debug!(
        "grading {} record(s) with config '{}' in {} mode",
        data.len(),
        config.name,
        mode.name()
    );

    let rule_headers = HeaderMap::resolve_fields(header_row, &config.rule_fields());
    let mut rows: Vec<RowVerdict> = data
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut v = RowVerdict::new(i + 1);
            v.violations = validate(row, &rule_headers, config.rules());
            v
        })
        .collect();

    let table = match mode {
        BatchMode::LocalValidate => {
            let table = config.validation_table();
            for v in &mut rows {
                let pass = if v.violations.is_empty() { 1.0 } else { 0.0 };
                assign_tier(v, table, pass)?;
            }
            table
        }
        BatchMode::ExternalScore(scores) => {
            let table = config.tier_table();
            if scores.len() < rows.len() {
                log::warn!(
                    "score source returned {} entries for {} record(s)",
                    scores.len(),
                    rows.len()
                );
            }
            for (i, v) in rows.iter_mut().enumerate() {
                match scores.get(i).and_then(Option::as_ref) {
                    Some(ext) => apply_external(v, ext, table)?,
                    None => {
                        log::warn!("row {}: no score data", v.row);
                        v.error = Some(RowError::IncompleteScoreData { row: v.row });
                    }
                }
            }
            table
        }
        BatchMode::Heuristic => {
            let table = config.tier_table();
            let headers = HeaderMap::resolve(header_row);
            for (v, row) in rows.iter_mut().zip(data) {
                let record = headers.record(row);
                let lead = score_record(&record);
                v.insights = Some(lead.insights(&record));
                // Reasoning line first, same slot as an external reasoning line.
                v.notes = std::iter::once(lead.reasoning())
                    .chain(lead.strengths.iter().map(|s| format!("strength: {s}")))
                    .chain(lead.risk_factors.iter().map(|r| format!("risk: {r}")))
                    .collect();
                let score = f64::from(lead.score);
                v.score = Some(score);
                assign_tier(v, table, score)?;
            }
            table
        }
    };

    let summary = compute_summary(&rows, table);
    log::info!(
        "graded {} record(s): {} classified, {} failed",
        rows.len(),
        summary.total,
        summary.failed
    );

    Ok(BatchResult {
        meta: BatchMeta {
            config_name: config.name.clone(),
            mode: mode.name().to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        },
        summary,
        rows,
    })
}

fn apply_external(v: &mut RowVerdict, ext: &ExternalScore, table: &TierTable) -> Result<(), GradeError> {
    v.score = Some(ext.score);
    if let Some(ref reasoning) = ext.reasoning {
        v.notes.push(reasoning.clone());
    }
    v.insights = ext.insights.clone();
    assign_tier(v, table, ext.score)
}

/// Classify and attach tier, color and guidance. A score outside every band
/// becomes a row error, not a batch failure.
fn assign_tier(v: &mut RowVerdict, table: &TierTable, score: f64) -> Result<(), GradeError> {
    let Some(tier) = table.classify(score) else {
        log::warn!("row {}: score {score} not covered by any tier", v.row);
        v.error = Some(RowError::ScoreOutOfRange { row: v.row, score });
        return Ok(());
    };
    v.color = Some(color_of(tier)?.to_string());
    v.tier = Some(tier.name.clone());
    v.recommendation = tier.recommendation.clone();
    v.next_action = tier.next_action.clone();
    Ok(())
}
