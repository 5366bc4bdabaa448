use std::path::Path;

use serde::Deserialize;

use crate::error::GradeError;
use crate::presentation::color_of;
use crate::rules::{standard_rules, FieldFormat, FieldRule};
use crate::tier::{binary_tiers, four_tiers, Tier, TierTable};

// ---------------------------------------------------------------------------
// File format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default = "default_name")]
    name: String,
    #[serde(default)]
    score_floor: f64,
    #[serde(default = "standard_rules")]
    rules: Vec<FieldRule>,
    #[serde(default = "four_tiers")]
    tiers: Vec<Tier>,
    #[serde(default = "binary_tiers")]
    validation_tiers: Vec<Tier>,
}

fn default_name() -> String {
    "default".to_string()
}

// ---------------------------------------------------------------------------
// Validated config
// ---------------------------------------------------------------------------

/// Rule set plus tier tables, checked once before any batch runs.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeConfig {
    pub name: String,
    rules: Vec<FieldRule>,
    tiers: TierTable,
    validation_tiers: TierTable,
}

impl Default for GradeConfig {
    /// Standard contact rules, four-tier scoring, binary validation.
    fn default() -> Self {
        Self {
            name: default_name(),
            rules: standard_rules(),
            tiers: TierTable::four_tier(),
            validation_tiers: TierTable::binary(),
        }
    }
}

impl GradeConfig {
    pub fn new(
        name: &str,
        rules: Vec<FieldRule>,
        tiers: Vec<Tier>,
        validation_tiers: Vec<Tier>,
        score_floor: f64,
    ) -> Result<Self, GradeError> {
        let tiers = TierTable::new(tiers, score_floor)
            .map_err(|e| GradeError::Configuration(format!("tiers: {}", inner(e))))?;
        // Validation verdicts are 0 (invalid) or 1 (valid).
        let validation_tiers = TierTable::new(validation_tiers, 0.0)
            .map_err(|e| GradeError::Configuration(format!("validation_tiers: {}", inner(e))))?;

        let config = Self {
            name: name.to_string(),
            rules,
            tiers,
            validation_tiers,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(input: &str) -> Result<Self, GradeError> {
        let file: ConfigFile =
            toml::from_str(input).map_err(|e| GradeError::ConfigParse(e.to_string()))?;
        Self::new(
            &file.name,
            file.rules,
            file.tiers,
            file.validation_tiers,
            file.score_floor,
        )
    }

    pub fn from_file(path: &Path) -> Result<Self, GradeError> {
        let input = std::fs::read_to_string(path)
            .map_err(|e| GradeError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml(&input)
    }

    pub fn with_tiers(mut self, tiers: TierTable) -> Result<Self, GradeError> {
        self.tiers = tiers;
        self.validate()?;
        Ok(self)
    }

    pub fn tier_table(&self) -> &TierTable {
        &self.tiers
    }

    pub fn validation_table(&self) -> &TierTable {
        &self.validation_tiers
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Every tier has a color; valid (1) and invalid (0) rows land in
    /// different validation tiers; rule fields are non-blank and unique.
    pub fn validate(&self) -> Result<(), GradeError> {
        for tier in self.tiers.tiers().iter().chain(self.validation_tiers.tiers()) {
            color_of(tier)?;
        }

        match (
            self.validation_tiers.classify(1.0),
            self.validation_tiers.classify(0.0),
        ) {
            (Some(pass), Some(fail)) if pass.name != fail.name => {}
            (pass, fail) => {
                return Err(GradeError::Configuration(format!(
                    "validation_tiers must put valid rows (1) and invalid rows (0) in different tiers, got {} and {}",
                    pass.map_or("none", |t| t.name.as_str()),
                    fail.map_or("none", |t| t.name.as_str())
                )))
            }
        }

        for (i, rule) in self.rules.iter().enumerate() {
            if rule.field.trim().is_empty() {
                return Err(GradeError::Configuration(format!(
                    "rule #{} has a blank field name",
                    i + 1
                )));
            }
            if rule.field.trim() != rule.field {
                return Err(GradeError::Configuration(format!(
                    "rule field '{}' has surrounding whitespace",
                    rule.field
                )));
            }
            if self.rules[..i].iter().any(|r| r.field == rule.field) {
                return Err(GradeError::Configuration(format!(
                    "field '{}' has more than one rule",
                    rule.field
                )));
            }
            match rule.format {
                Some(FieldFormat::MinDigits(0)) => {
                    return Err(GradeError::Configuration(format!(
                        "field '{}': min_digits must be at least 1",
                        rule.field
                    )))
                }
                Some(FieldFormat::Contains(ref needle)) if needle.is_empty() => {
                    return Err(GradeError::Configuration(format!(
                        "field '{}': contains needs a non-empty value",
                        rule.field
                    )))
                }
                Some(_) if rule.failure_label.trim().is_empty() => {
                    return Err(GradeError::Configuration(format!(
                        "field '{}': a format rule needs a failure_label",
                        rule.field
                    )))
                }
                _ => {}
            }
        }

        Ok(())
    }

    pub fn rule_fields(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.field.as_str()).collect()
    }
}

fn inner(err: GradeError) -> String {
    match err {
        GradeError::Configuration(msg) => msg,
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
