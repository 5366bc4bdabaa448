//! Boundary with the remote scoring service.
//!
//! The engine never talks to the network. Callers build a [`ScoreRequest`]
//! from the grid, send it however they like, and hand the raw response body
//! to [`parse_response`]. Nothing in the response is trusted: each entry
//! must carry a finite numeric score or it is dropped to `None`, which the
//! batch later reports as incomplete score data for that row.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::GradeError;
use crate::header::HeaderMap;
use crate::model::Grid;

/// Payload for the scoring service: one field -> value record per data row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRequest {
    pub leads: Vec<BTreeMap<String, String>>,
}

/// A validated entry from the scoring service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalScore {
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<String>,
}

impl ExternalScore {
    pub fn new(score: f64) -> Self {
        Self {
            score,
            reasoning: None,
            insights: None,
        }
    }
}

pub fn build_request(grid: &Grid) -> Result<ScoreRequest, GradeError> {
    if grid.len() < 2 {
        return Err(GradeError::InsufficientData { rows: grid.len() });
    }
    let headers = HeaderMap::resolve(&grid[0]);
    let leads = grid[1..].iter().map(|row| headers.record(row)).collect();
    Ok(ScoreRequest { leads })
}

/// Accepts a bare array of entries or an object with a `scored_leads` array.
pub fn parse_response(body: &str) -> Result<Vec<Option<ExternalScore>>, GradeError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| GradeError::ScoreResponse(e.to_string()))?;

    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut obj) => match obj.remove("scored_leads") {
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                return Err(GradeError::ScoreResponse(
                    "'scored_leads' is not an array".into(),
                ))
            }
            None => {
                return Err(GradeError::ScoreResponse(
                    "response has no 'scored_leads' array".into(),
                ))
            }
        },
        _ => {
            return Err(GradeError::ScoreResponse(
                "expected an array or an object with 'scored_leads'".into(),
            ))
        }
    };

    Ok(entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let parsed = parse_entry(entry);
            if parsed.is_none() {
                log::warn!("score entry {} has no numeric score; row will be marked incomplete", i + 1);
            }
            parsed
        })
        .collect())
}

fn parse_entry(entry: &Value) -> Option<ExternalScore> {
    let obj = entry.as_object()?;
    let score = obj
        .get("score")
        .or_else(|| obj.get("quality_score"))
        .and_then(Value::as_f64)
        .filter(|s| s.is_finite())?;

    let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

    Some(ExternalScore {
        score,
        reasoning: text("reasoning"),
        insights: text("ai_insights").or_else(|| text("insights")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;

    #[test]
    fn request_uses_resolved_headers() {
        let grid: Grid = vec![
            vec!["Name".into(), " Email ".into(), "".into()],
            vec!["Alice".into(), "a@b.com".into(), "ignored".into()],
            vec!["Bob".into()],
        ];
        let req = build_request(&grid).unwrap();
        assert_eq!(req.leads.len(), 2);
        assert_eq!(req.leads[0]["Email"], "a@b.com");
        assert_eq!(req.leads[0].len(), 2);
        assert_eq!(req.leads[1]["Email"], "");

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["leads"][0]["Name"], "Alice");
    }

    #[test]
    fn request_needs_a_data_row() {
        let grid: Grid = vec![vec![CellValue::from("Name")]];
        assert!(matches!(
            build_request(&grid),
            Err(GradeError::InsufficientData { rows: 1 })
        ));
    }

    #[test]
    fn parse_scored_leads_object() {
        let body = r#"{
            "scored_leads": [
                {"name": "Alice", "score": 91, "reasoning": "Strengths: High budget.", "ai_insights": "Call now"},
                {"name": "Bob", "score": 42.5}
            ],
            "summary": {"total_leads": 2}
        }"#;
        let scores = parse_response(body).unwrap();
        assert_eq!(scores.len(), 2);
        let first = scores[0].as_ref().unwrap();
        assert_eq!(first.score, 91.0);
        assert_eq!(first.reasoning.as_deref(), Some("Strengths: High budget."));
        assert_eq!(first.insights.as_deref(), Some("Call now"));
        assert_eq!(scores[1].as_ref().unwrap().score, 42.5);
    }

    #[test]
    fn parse_bare_array_with_quality_score() {
        let scores = parse_response(r#"[{"quality_score": 77}]"#).unwrap();
        assert_eq!(scores[0].as_ref().unwrap().score, 77.0);
    }

    #[test]
    fn invalid_entries_become_none() {
        let body = r#"[{"score": "88"}, {"reasoning": "no score"}, 12, {"score": null}, {"score": 60}]"#;
        let scores = parse_response(body).unwrap();
        assert_eq!(scores.len(), 5);
        assert!(scores[..4].iter().all(Option::is_none));
        assert_eq!(scores[4].as_ref().unwrap().score, 60.0);
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(matches!(parse_response("not json"), Err(GradeError::ScoreResponse(_))));
        assert!(matches!(parse_response("42"), Err(GradeError::ScoreResponse(_))));
        let err = parse_response(r#"{"results": []}"#).unwrap_err();
        assert!(err.to_string().contains("scored_leads"));
    }
}
