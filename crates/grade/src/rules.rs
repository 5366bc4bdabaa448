//! Field-level validation of a single record.
//!
//! Output order is rule declaration order. A field that is missing never gets
//! a second, format-level violation.

use serde::{Deserialize, Serialize};

use crate::cell::{cell_at, CellValue};
use crate::header::HeaderMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    pub field: String,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub format: Option<FieldFormat>,
    #[serde(default)]
    pub failure_label: String,
}

fn default_required() -> bool {
    true
}

/// Format predicate applied to the coerced cell string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFormat {
    /// Value contains this literal substring.
    Contains(String),
    /// At least this many digits remain after dropping every non-digit.
    MinDigits(usize),
}

impl FieldFormat {
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Self::Contains(needle) => value.contains(needle.as_str()),
            Self::MinDigits(count) => value.chars().filter(char::is_ascii_digit).count() >= *count,
        }
    }
}

impl FieldRule {
    pub fn required(field: &str) -> Self {
        Self {
            field: field.to_string(),
            required: true,
            format: None,
            failure_label: String::new(),
        }
    }

    pub fn with_format(mut self, format: FieldFormat, failure_label: &str) -> Self {
        self.format = Some(format);
        self.failure_label = failure_label.to_string();
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn format_label(&self) -> String {
        if self.failure_label.is_empty() {
            self.field.clone()
        } else {
            format!("{} ({})", self.field, self.failure_label)
        }
    }
}

/// Name, Email (`@`), Phone (10+ digits), Company.
pub fn standard_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::required("Name"),
        FieldRule::required("Email").with_format(FieldFormat::Contains("@".into()), "invalid format"),
        FieldRule::required("Phone").with_format(FieldFormat::MinDigits(10), "too short"),
        FieldRule::required("Company"),
    ]
}

/// Violation labels for one row. Empty means the row is valid.
pub fn validate(row: &[CellValue], headers: &HeaderMap, rules: &[FieldRule]) -> Vec<String> {
    let mut violations = Vec::new();

    for rule in rules {
        let cell = headers.get(&rule.field).map(|idx| cell_at(row, idx));
        let value = match cell {
            Some(cell) if !cell.is_blank() => cell.as_text(),
            _ => {
                if rule.required {
                    violations.push(rule.field.clone());
                }
                continue;
            }
        };

        if let Some(ref format) = rule.format {
            if !format.accepts(value.trim()) {
                violations.push(rule.format_label());
            }
        }
    }

    violations
}
