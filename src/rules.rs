//! Validation rules and the ordered rule set
//!
//! A rule set maps field paths to rules; a validation pass walks the
//! set in insertion order. Rule sets are either declared once (static)
//! or derived from the current values on every pass, which lets a rule
//! read sibling fields.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// One sub-rule: a predicate over (value at path, all values) plus the
/// message recorded when it fails
#[derive(Clone)]
pub struct Check {
    message: String,
    predicate: Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>,
}

impl Check {
    pub fn new(
        message: impl Into<String>,
        predicate: impl Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Run the predicate against the value at this rule's path and the
    /// whole values record
    pub fn passes(&self, value: &Value, all_values: &Value) -> bool {
        (self.predicate)(value, all_values)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Validation rule for one field path
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub required: bool,
    /// Message recorded when the field is required but empty
    pub message: String,
    /// Sub-rules, evaluated in order until the first failure
    pub checks: Vec<Check>,
}

impl FieldRule {
    /// A rule that rejects empty values with the given message
    pub fn required(message: impl Into<String>) -> Self {
        Self {
            required: true,
            message: message.into(),
            checks: Vec::new(),
        }
    }

    /// A rule with no required constraint; useful as a base for checks
    pub fn optional() -> Self {
        Self {
            required: false,
            message: String::new(),
            checks: Vec::new(),
        }
    }

    /// Append a sub-rule built from a predicate and message
    pub fn check(
        mut self,
        message: impl Into<String>,
        predicate: impl Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.checks.push(Check::new(message, predicate));
        self
    }

    /// Append an already-built sub-rule
    pub fn with_check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }
}

/// Ordered mapping from field path to rule
///
/// Iteration order is declaration order; re-declaring a path replaces
/// its rule in place without moving it.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    entries: Vec<(String, FieldRule)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rule for a field path (chaining)
    pub fn field(mut self, path: impl Into<String>, rule: FieldRule) -> Self {
        let path = path.into();
        if let Some(entry) = self.entries.iter_mut().find(|(p, _)| *p == path) {
            entry.1 = rule;
        } else {
            self.entries.push((path, rule));
        }
        self
    }

    pub fn get(&self, path: &str) -> Option<&FieldRule> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, rule)| rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.entries.iter().map(|(p, rule)| (p.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
