use std::path::PathBuf;

use leadgrid_grade::external::{build_request, parse_response};
use leadgrid_grade::grid::load_csv_grid;
use leadgrid_grade::{
    paint_plan, run, BatchMode, BatchResult, GradeConfig, GradeError, Grid, RowError,
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_grid(name: &str) -> Grid {
    let path = fixtures_dir().join(name);
    let csv_data = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    load_csv_grid(&csv_data).unwrap()
}

fn three_tier_config() -> GradeConfig {
    GradeConfig::from_file(&fixtures_dir().join("three-tier.grade.toml")).unwrap()
}

fn violations(result: &BatchResult) -> Vec<Vec<&str>> {
    result
        .rows
        .iter()
        .map(|v| v.violations.iter().map(String::as_str).collect())
        .collect()
}

// -------------------------------------------------------------------------
// Local validation
// -------------------------------------------------------------------------

#[test]
fn contact_check_flags_each_row() {
    let grid = load_grid("contacts.csv");
    let result = run(&GradeConfig::default(), &grid, BatchMode::LocalValidate).unwrap();

    assert_eq!(result.summary.total, 5);
    assert_eq!(result.summary.count("valid"), 1);
    assert_eq!(result.summary.count("invalid"), 4);
    assert_eq!(result.summary.failed, 0);
    assert_eq!(
        violations(&result),
        vec![
            vec![],
            vec!["Email"],
            vec!["Phone (too short)"],
            vec!["Email (invalid format)"],
            vec!["Name", "Company"],
        ]
    );
}

#[test]
fn contact_check_paint_plan() {
    let grid = load_grid("contacts.csv");
    let result = run(&GradeConfig::default(), &grid, BatchMode::LocalValidate).unwrap();
    let plan = paint_plan(&result);

    assert_eq!(plan.len(), 5);
    assert_eq!(plan[0].row, 1);
    assert_eq!(plan[0].tier, "valid");
    assert_eq!(plan[0].color, "#D4EDDA");
    assert!(plan[1..].iter().all(|p| p.tier == "invalid" && p.color == "#FFF3CD"));
}

#[test]
fn reordered_headers_resolve_by_name() {
    let csv = "Company,Phone,Email,Name\nAcme,1234567890,a@b.com,Alice\nBeta,555,b@b.com,\n";
    let grid = load_csv_grid(csv).unwrap();
    let result = run(&GradeConfig::default(), &grid, BatchMode::LocalValidate).unwrap();
    assert_eq!(violations(&result), vec![vec![], vec!["Name", "Phone (too short)"]]);
}

#[test]
fn missing_column_reported_on_every_row() {
    let csv = "Name,Email,Company\nAlice,a@b.com,Acme\nBob,b@b.com,Beta\n";
    let grid = load_csv_grid(csv).unwrap();
    let result = run(&GradeConfig::default(), &grid, BatchMode::LocalValidate).unwrap();
    assert_eq!(violations(&result), vec![vec!["Phone"], vec!["Phone"]]);
    assert_eq!(result.summary.count("invalid"), 2);
}

#[test]
fn header_only_sheet_is_rejected() {
    let grid = load_csv_grid("Name,Email,Phone,Company\n").unwrap();
    let err = run(&GradeConfig::default(), &grid, BatchMode::LocalValidate).unwrap_err();
    assert!(matches!(err, GradeError::InsufficientData { rows: 1 }));
}

// -------------------------------------------------------------------------
// Heuristic scoring
// -------------------------------------------------------------------------

#[test]
fn heuristic_four_tier_batch() {
    let grid = load_grid("leads.csv");
    let result = run(&GradeConfig::default(), &grid, BatchMode::Heuristic).unwrap();

    let scores: Vec<f64> = result.rows.iter().map(|v| v.score.unwrap()).collect();
    assert_eq!(scores, vec![100.0, 85.0, 50.0, 20.0]);

    let tiers: Vec<&str> = result.rows.iter().map(|v| v.tier.as_deref().unwrap()).collect();
    assert_eq!(tiers, vec!["hot", "hot", "cold", "dead"]);

    assert_eq!(result.summary.count("hot"), 2);
    assert_eq!(result.summary.count("warm"), 0);
    assert_eq!(result.summary.count("cold"), 1);
    assert_eq!(result.summary.count("dead"), 1);
    assert_eq!(result.summary.average_score, Some(63.75));
    assert!(result.summary.narrative.starts_with("Analysis of 4 leads shows an average score of 63.8."));
    assert!(result.summary.narrative.ends_with("Mixed lead quality - prioritize high-scoring leads."));

    assert_eq!(result.rows[3].recommendation.as_deref(), Some("Dead Lead - Archive"));
}

#[test]
fn heuristic_with_three_tier_config() {
    let grid = load_grid("leads.csv");
    let result = run(&three_tier_config(), &grid, BatchMode::Heuristic).unwrap();

    assert_eq!(result.meta.config_name, "Three-tier lead quality");
    assert_eq!(result.summary.count("high"), 2);
    assert_eq!(result.summary.count("medium"), 0);
    assert_eq!(result.summary.count("low"), 2);
    // Three-tier rules have no Phone requirement.
    assert!(result.rows.iter().all(|v| v.violations.is_empty()));
}

// -------------------------------------------------------------------------
// External scores
// -------------------------------------------------------------------------

#[test]
fn external_scores_partial_failure() {
    let grid = load_grid("leads.csv");
    let body = std::fs::read_to_string(fixtures_dir().join("scores.json")).unwrap();
    let scores = parse_response(&body).unwrap();
    assert_eq!(scores.len(), 3);

    let result = run(&three_tier_config(), &grid, BatchMode::ExternalScore(&scores)).unwrap();

    assert_eq!(result.rows[0].tier.as_deref(), Some("high"));
    assert_eq!(result.rows[0].insights.as_deref(), Some("Contact immediately."));
    assert_eq!(result.rows[1].tier.as_deref(), Some("medium"));
    assert_eq!(result.rows[2].error, Some(RowError::IncompleteScoreData { row: 3 }));
    assert_eq!(result.rows[3].error, Some(RowError::IncompleteScoreData { row: 4 }));

    assert_eq!(result.summary.total, 2);
    assert_eq!(result.summary.failed, 2);
    assert_eq!(result.summary.average_score, Some(81.5));
    assert_eq!(paint_plan(&result).len(), 2);
}

#[test]
fn score_request_mirrors_grid() {
    let grid = load_grid("leads.csv");
    let request = build_request(&grid).unwrap();
    assert_eq!(request.leads.len(), 4);
    assert_eq!(request.leads[0]["Budget Range"], "$100K+");
    assert_eq!(request.leads[3]["Industry"], "");
}

// -------------------------------------------------------------------------
// Output shape
// -------------------------------------------------------------------------

#[test]
fn result_serializes_to_json() {
    let grid = load_grid("contacts.csv");
    let result = run(&GradeConfig::default(), &grid, BatchMode::LocalValidate).unwrap();
    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();

    assert_eq!(json["meta"]["mode"], "local_validate");
    assert_eq!(json["summary"]["tier_counts"]["invalid"], 4);
    assert_eq!(json["rows"][1]["violations"][0], "Email");
    assert!(json["rows"][0].get("error").is_none());
    assert!(json["summary"].get("average_score").is_none());
}

#[test]
fn repeated_runs_are_identical() {
    let grid = load_grid("leads.csv");
    let config = GradeConfig::default();
    let first = run(&config, &grid, BatchMode::Heuristic).unwrap();
    let second = run(&config, &grid, BatchMode::Heuristic).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}
