//! Declarative form schemas
//!
//! Host apps that keep their validation rules in data (JSON shipped
//! with the app or fetched per screen) deserialize them here and
//! compile them into a [`RuleSet`].

use crate::rules::{Check, FieldRule, RuleSet};
use crate::validators;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors while loading or parsing a schema document
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse schema JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A whole form's declared fields; field order is rule order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

/// One field's declared constraints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    /// Message for the required constraint; defaults to "<name> is required"
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub checks: Vec<CheckSchema>,
}

/// Declarative counterpart of a sub-rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckSchema {
    MinLength { min: usize, message: String },
    MaxLength { max: usize, message: String },
    Min { min: f64, message: String },
    Max { max: f64, message: String },
    Pattern { pattern: PatternKind, message: String },
}

/// Built-in string patterns backed by the validators module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Email,
    MobileNumber,
    Otp,
    PinCode,
    #[serde(rename = "time_12h")]
    Time12h,
    Date,
}

impl FormSchema {
    /// Parse a schema from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a schema from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Compile into an executable rule set, preserving field order
    pub fn into_rule_set(self) -> RuleSet {
        let mut rules = RuleSet::new();
        for field in self.fields {
            let message = field
                .message
                .unwrap_or_else(|| format!("{} is required", field.name));
            let mut rule = if field.required {
                FieldRule::required(message)
            } else {
                FieldRule::optional()
            };
            for check in field.checks {
                rule = rule.with_check(check.into_check());
            }
            rules = rules.field(field.name, rule);
        }
        rules
    }
}

impl CheckSchema {
    fn into_check(self) -> Check {
        match self {
            CheckSchema::MinLength { min, message } => validators::min_length(min, message),
            CheckSchema::MaxLength { max, message } => validators::max_length(max, message),
            CheckSchema::Min { min, message } => validators::min(min, message),
            CheckSchema::Max { max, message } => validators::max(max, message),
            CheckSchema::Pattern { pattern, message } => match pattern {
                PatternKind::Email => validators::email(message),
                PatternKind::MobileNumber => validators::mobile_number(message),
                PatternKind::Otp => validators::otp(message),
                PatternKind::PinCode => validators::pin_code(message),
                PatternKind::Time12h => validators::time_12h(message),
                PatternKind::Date => validators::date(message),
            },
        }
    }
}
