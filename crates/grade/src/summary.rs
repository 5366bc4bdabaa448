use std::collections::BTreeMap;

use crate::model::{BatchSummary, RowVerdict};
use crate::tier::TierTable;

/// Single pass over finished verdicts. Rows with a row error are counted as
/// `failed` and kept out of tier counts and the average.
pub fn compute_summary(rows: &[RowVerdict], table: &TierTable) -> BatchSummary {
    let mut tier_counts: BTreeMap<String, usize> =
        table.tiers().iter().map(|t| (t.name.clone(), 0)).collect();
    let mut total = 0;
    let mut failed = 0;
    let mut score_sum = 0.0;
    let mut scored = 0usize;

    for v in rows {
        if v.error.is_some() {
            failed += 1;
            continue;
        }
        let Some(ref tier) = v.tier else {
            continue;
        };
        total += 1;
        *tier_counts.entry(tier.clone()).or_insert(0) += 1;
        if let Some(score) = v.score {
            score_sum += score;
            scored += 1;
        }
    }

    let average_score = (scored > 0).then(|| score_sum / scored as f64);
    let narrative = describe(total, failed, average_score, &tier_counts, table);

    BatchSummary {
        total,
        failed,
        tier_counts,
        average_score,
        narrative,
    }
}

/// Plain-text overview, e.g. "Analysis of 8 leads shows an average score of
/// 61.3. hot: 2, warm: 3, cold: 2, dead: 1. Mixed lead quality - prioritize
/// high-scoring leads."
fn describe(
    total: usize,
    failed: usize,
    average: Option<f64>,
    counts: &BTreeMap<String, usize>,
    table: &TierTable,
) -> String {
    let mut out = match average {
        Some(avg) => format!("Analysis of {total} leads shows an average score of {avg:.1}. "),
        None => format!("Analysis of {total} records. "),
    };

    let breakdown: Vec<String> = table
        .tiers()
        .iter()
        .map(|t| format!("{}: {}", t.name, counts.get(&t.name).copied().unwrap_or(0)))
        .collect();
    out.push_str(&breakdown.join(", "));
    out.push('.');

    if failed > 0 {
        out.push_str(&format!(" {failed} row(s) could not be scored."));
    }

    // Quality wording only describes scored batches.
    if total == 0 || average.is_none() {
        return out;
    }
    let share = |name: &str| counts.get(name).copied().unwrap_or(0) * 2 > total;
    if share(&table.top().name) {
        out.push_str(" Strong lead quality overall.");
    } else if share(&table.bottom().name) {
        out.push_str(" Focus on lead nurturing and qualification.");
    } else {
        out.push_str(" Mixed lead quality - prioritize high-scoring leads.");
    }
    out
}
