//! Ordered score bands.
//!
//! A table is a list of tiers in descending order of `min`. Each tier covers
//! `[min, next_higher.min)`; the top tier is open above. Validation happens
//! once when the table is built so classification can never hit a
//! misconfigured table mid-batch.

use serde::{Deserialize, Serialize};

use crate::error::GradeError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub name: String,
    /// Inclusive lower bound. `-inf` makes a catch-all tier.
    pub min: f64,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub next_action: Option<String>,
}

impl Tier {
    pub fn new(name: &str, min: f64, color: &str) -> Self {
        Self {
            name: name.to_string(),
            min,
            color: Some(color.to_string()),
            recommendation: None,
            next_action: None,
        }
    }

    pub fn with_guidance(mut self, recommendation: &str, next_action: &str) -> Self {
        self.recommendation = Some(recommendation.to_string());
        self.next_action = Some(next_action.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl TierTable {
    /// Build a table whose bands cover every score from `floor` upward.
    pub fn new(tiers: Vec<Tier>, floor: f64) -> Result<Self, GradeError> {
        if tiers.is_empty() {
            return Err(GradeError::Configuration("tier table is empty".into()));
        }

        for (i, tier) in tiers.iter().enumerate() {
            if tier.name.trim().is_empty() {
                return Err(GradeError::Configuration(format!("tier #{} has a blank name", i + 1)));
            }
            if tier.min.is_nan() {
                return Err(GradeError::Configuration(format!(
                    "tier '{}': minimum is NaN",
                    tier.name
                )));
            }
            if tiers[..i].iter().any(|t| t.name == tier.name) {
                return Err(GradeError::Configuration(format!(
                    "tier '{}' is declared twice",
                    tier.name
                )));
            }
        }

        for pair in tiers.windows(2) {
            if pair[0].min <= pair[1].min {
                return Err(GradeError::Configuration(format!(
                    "tiers must be in descending order of minimum: '{}' ({}) is not above '{}' ({})",
                    pair[0].name, pair[0].min, pair[1].name, pair[1].min
                )));
            }
        }

        // Non-empty, checked above.
        let lowest = &tiers[tiers.len() - 1];
        if lowest.min > floor {
            return Err(GradeError::Configuration(format!(
                "tier table does not cover the score range: lowest tier '{}' starts at {}, scores start at {floor}",
                lowest.name, lowest.min
            )));
        }

        Ok(Self { tiers })
    }

    /// First tier (top-down) whose minimum is at or below `score`.
    ///
    /// `None` for NaN, or for a score below every band when the table has no
    /// `-inf` catch-all.
    pub fn classify(&self, score: f64) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.min <= score)
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn top(&self) -> &Tier {
        &self.tiers[0]
    }

    pub fn bottom(&self) -> &Tier {
        &self.tiers[self.tiers.len() - 1]
    }

    pub fn get(&self, name: &str) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.name == name)
    }

    /// `valid` / `invalid`, used by local validation (valid rows score 1).
    pub fn binary() -> Self {
        Self {
            tiers: binary_tiers(),
        }
    }

    /// `high` >= 80, `medium` >= 60, `low`.
    pub fn three_tier() -> Self {
        Self {
            tiers: three_tiers(),
        }
    }

    /// `hot` >= 80, `warm` >= 60, `cold` >= 40, `dead`.
    pub fn four_tier() -> Self {
        Self {
            tiers: four_tiers(),
        }
    }
}

pub fn binary_tiers() -> Vec<Tier> {
    vec![
        Tier::new("valid", 1.0, "#D4EDDA"),
        Tier::new("invalid", 0.0, "#FFF3CD"),
    ]
}

pub fn three_tiers() -> Vec<Tier> {
    vec![
        Tier::new("high", 80.0, "#D4EDDA"),
        Tier::new("medium", 60.0, "#FFF3CD"),
        Tier::new("low", 0.0, "#F8D7DA"),
    ]
}

pub fn four_tiers() -> Vec<Tier> {
    vec![
        Tier::new("hot", 80.0, "#D4EDDA")
            .with_guidance("Hot Lead - High priority", "Schedule demo within 24 hours"),
        Tier::new("warm", 60.0, "#FFF3CD")
            .with_guidance("Warm Lead - Follow up soon", "Send proposal within 48 hours"),
        Tier::new("cold", 40.0, "#F8D7DA")
            .with_guidance("Cold Lead - Nurture campaign", "Add to nurture campaign"),
        Tier::new("dead", 0.0, "#F5C6CB")
            .with_guidance("Dead Lead - Archive", "Archive and focus on better leads"),
    ]
}
