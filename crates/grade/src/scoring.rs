//! Heuristic lead scorer.
//!
//! Deterministic 0-100 score built from point tables over the common CRM
//! columns. Each factor either adds points, records a strength, or records a
//! risk factor. A missing column scores zero for its factor.

use std::collections::BTreeMap;

use serde::Serialize;

pub const MAX_SCORE: u32 = 100;

pub mod fields {
    pub const NAME: &str = "Name";
    pub const EMAIL: &str = "Email";
    pub const COMPANY: &str = "Company";
    pub const INDUSTRY: &str = "Industry";
    pub const REVENUE: &str = "Revenue";
    pub const EMPLOYEE_COUNT: &str = "Employee Count";
    pub const RESPONSE_RATE: &str = "Response Rate";
    pub const BUDGET_RANGE: &str = "Budget Range";
    pub const TIMELINE: &str = "Timeline";
    pub const DECISION_MAKER: &str = "Decision Maker";
    pub const ENGAGEMENT_LEVEL: &str = "Engagement Level";
    pub const LEAD_SOURCE: &str = "Lead Source";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadScore {
    pub score: u32,
    pub strengths: Vec<String>,
    pub risk_factors: Vec<String>,
}

impl LeadScore {
    /// "Strengths: a, b, c. Issues: x, y." (top three strengths, top two issues).
    pub fn reasoning(&self) -> String {
        let list = |items: &[String], n: usize| {
            if items.is_empty() {
                "None".to_string()
            } else {
                items.iter().take(n).cloned().collect::<Vec<_>>().join(", ")
            }
        };
        format!(
            "Strengths: {}. Issues: {}.",
            list(&self.strengths, 3),
            list(&self.risk_factors, 2)
        )
    }

    /// Offline insight paragraph, banded EXCELLENT >= 85, STRONG >= 70,
    /// MODERATE >= 50, otherwise LOW-PRIORITY.
    pub fn insights(&self, record: &BTreeMap<String, String>) -> String {
        let get = |key: &str| record.get(key).map(|v| v.trim()).unwrap_or("");
        let first = |items: &[String], n: usize| {
            items.iter().take(n).cloned().collect::<Vec<_>>().join(", ")
        };
        let or = |text: String, fallback: &str| {
            if text.is_empty() {
                fallback.to_string()
            } else {
                text
            }
        };

        let score = self.score;
        let name = get(fields::NAME);
        let company = get(fields::COMPANY);

        if score >= 85 {
            format!(
                "EXCELLENT LEAD ({score}/100): {name} from {company} ({}) represents a high-priority opportunity. \
                 Key strengths: {}. With budget {} and timeline {}, this {} should be contacted immediately for proposal presentation.",
                get(fields::INDUSTRY),
                first(&self.strengths, 3),
                get(fields::BUDGET_RANGE),
                get(fields::TIMELINE),
                get(fields::DECISION_MAKER),
            )
        } else if score >= 70 {
            format!(
                "STRONG LEAD ({score}/100): {name} from {company} shows good potential with {}. \
                 Timeline {} and budget {} indicate readiness. Focus on addressing: {}.",
                first(&self.strengths, 2),
                get(fields::TIMELINE),
                get(fields::BUDGET_RANGE),
                or(first(&self.risk_factors, 2), "No major concerns"),
            )
        } else if score >= 50 {
            format!(
                "MODERATE LEAD ({score}/100): {name} from {company} needs nurturing. \
                 Strengths: {}. Concerns: {}. Consider qualification call.",
                or(first(&self.strengths, 2), "Limited"),
                or(first(&self.risk_factors, 3), "Missing information"),
            )
        } else {
            format!(
                "LOW-PRIORITY LEAD ({score}/100): {name} from {company} requires significant qualification. \
                 Major issues: {}. Consider automated nurturing or archive.",
                or(first(&self.risk_factors, 3), "Multiple data gaps"),
            )
        }
    }
}

#[derive(Default)]
struct Tally {
    points: u32,
    strengths: Vec<String>,
    risks: Vec<String>,
}

impl Tally {
    fn add(&mut self, points: u32) -> &mut Self {
        self.points += points;
        self
    }

    fn strength(&mut self, s: &str) -> &mut Self {
        self.strengths.push(s.to_string());
        self
    }

    fn risk(&mut self, s: &str) -> &mut Self {
        self.risks.push(s.to_string());
        self
    }
}

pub fn score_record(record: &BTreeMap<String, String>) -> LeadScore {
    let get = |key: &str| record.get(key).map(|v| v.trim()).unwrap_or("");
    let mut t = Tally::default();

    score_contact(&mut t, get(fields::NAME), get(fields::EMAIL), get(fields::COMPANY));
    score_industry(&mut t, get(fields::INDUSTRY));
    score_revenue(&mut t, get(fields::REVENUE));
    score_employees(&mut t, get(fields::EMPLOYEE_COUNT));
    score_response_rate(&mut t, get(fields::RESPONSE_RATE));
    score_budget(&mut t, get(fields::BUDGET_RANGE));
    score_timeline(&mut t, get(fields::TIMELINE));
    score_decision_maker(&mut t, get(fields::DECISION_MAKER));
    score_engagement(&mut t, get(fields::ENGAGEMENT_LEVEL));
    score_lead_source(&mut t, get(fields::LEAD_SOURCE));

    LeadScore {
        score: t.points.min(MAX_SCORE),
        strengths: t.strengths,
        risk_factors: t.risks,
    }
}

fn score_contact(t: &mut Tally, name: &str, email: &str, company: &str) {
    match (!name.is_empty(), !email.is_empty(), !company.is_empty()) {
        (true, true, true) => t.add(10).strength("Complete contact information"),
        (true, true, false) => t.add(7).risk("Missing company information"),
        (true, false, true) => t.add(5).risk("Missing email"),
        _ => t.add(2).risk("Missing basic contact information"),
    };

    if email.contains('@') && email.contains('.') {
        t.add(5);
    } else {
        t.risk("Invalid email format");
    }
}

fn score_industry(t: &mut Tally, industry: &str) {
    if industry.is_empty() {
        t.risk("Industry not specified");
        return;
    }
    match industry.to_lowercase().as_str() {
        "technology" | "healthcare" | "finance" => t.add(10).strength("High-value industry"),
        "manufacturing" | "retail" | "consulting" => t.add(8).strength("Good industry fit"),
        _ => t.add(5),
    };
}

/// Revenue in millions, read as the first decimal number in a value that
/// mentions `M` (`"$12.5M"` is 12.5, not the digit run 125).
fn score_revenue(t: &mut Tally, revenue: &str) {
    if revenue.is_empty() {
        t.risk("Revenue not specified");
        return;
    }
    let millions = if revenue.to_uppercase().contains('M') {
        leading_number(revenue)
    } else {
        None
    };
    match millions {
        Some(m) if m >= 50.0 => t.add(15).strength("Large enterprise"),
        Some(m) if m >= 20.0 => t.add(12).strength("Mid-market company"),
        Some(m) if m >= 10.0 => t.add(10).strength("Established business"),
        Some(_) => t.add(7),
        None => t.add(3).risk("Revenue information unclear"),
    };
}

fn score_employees(t: &mut Tally, count: &str) {
    if count.is_empty() {
        t.risk("Employee count not specified");
        return;
    }
    match count.parse::<i64>() {
        Ok(n) if n >= 200 => t.add(5).strength("Large team"),
        Ok(n) if n >= 100 => t.add(4).strength("Growing company"),
        Ok(n) if n >= 50 => t.add(3),
        Ok(_) => t.add(2),
        Err(_) => t.add(1),
    };
}

fn score_response_rate(t: &mut Tally, rate: &str) {
    if rate.is_empty() {
        t.risk("Response rate not specified");
        return;
    }
    match rate.replace('%', "").trim().parse::<f64>() {
        Ok(r) if r >= 90.0 => t.add(10).strength("Excellent responsiveness"),
        Ok(r) if r >= 80.0 => t.add(8).strength("Good responsiveness"),
        Ok(r) if r >= 60.0 => t.add(6),
        Ok(r) if r >= 40.0 => t.add(4).risk("Low response rate"),
        Ok(_) => t.add(2).risk("Very low response rate"),
        Err(_) => t.add(2).risk("Response rate unclear"),
    };
}

fn score_budget(t: &mut Tally, budget: &str) {
    if budget.is_empty() {
        t.risk("Budget not specified");
    } else if budget.contains("150K") || budget.contains("200K") {
        t.add(15).strength("High budget");
    } else if budget.contains("100K") {
        t.add(12).strength("Good budget");
    } else if budget.contains("75K") {
        t.add(10);
    } else if budget.contains("50K") {
        t.add(7);
    } else {
        t.add(3).risk("Limited budget");
    }
}

fn score_timeline(t: &mut Tally, timeline: &str) {
    if timeline.is_empty() {
        t.risk("Timeline not specified");
    } else if timeline.contains("Q1") {
        t.add(10).strength("Immediate timeline");
    } else if timeline.contains("Q2") {
        t.add(8).strength("Near-term timeline");
    } else if timeline.contains("Q3") {
        t.add(5);
    } else if timeline.contains("Q4") {
        t.add(3).risk("Long timeline");
    } else {
        t.add(2).risk("Timeline unclear");
    }
}

fn score_decision_maker(t: &mut Tally, title: &str) {
    if title.is_empty() {
        t.risk("Decision maker not specified");
        return;
    }
    let upper = title.to_uppercase();
    let has = |words: &[&str]| words.iter().any(|w| upper.contains(w));
    if has(&["CTO", "CIO", "VP", "DIRECTOR"]) {
        t.add(10).strength("Senior decision maker");
    } else if has(&["MANAGER", "LEAD"]) {
        t.add(7).strength("Mid-level decision maker");
    } else {
        t.add(5);
    }
}

fn score_engagement(t: &mut Tally, level: &str) {
    if level.is_empty() {
        t.risk("Engagement level not specified");
        return;
    }
    match level.to_lowercase().as_str() {
        "high" => t.add(10).strength("High engagement"),
        "medium" => t.add(7).strength("Moderate engagement"),
        "low" => t.add(3).risk("Low engagement"),
        _ => t.add(5),
    };
}

fn score_lead_source(t: &mut Tally, source: &str) {
    if source.is_empty() {
        t.risk("Lead source not specified");
        return;
    }
    match source.to_lowercase().as_str() {
        "referral" | "industry conference" | "trade show" => t.add(5).strength("Quality lead source"),
        "linkedin" | "website" | "social media" => t.add(4),
        "cold call" | "email campaign" => t.add(2),
        _ => t.add(3),
    };
}

/// First decimal number in `s` ("$12.5M" -> 12.5).
fn leading_number(s: &str) -> Option<f64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let rest = &s[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
        .unwrap_or(rest.len());
    rest[..end].replace(',', "").trim_end_matches('.').parse().ok()
}
