//! Form session lifecycle
//!
//! A session owns one screen's form: the current values record, the
//! rules source, the error list from the most recent validation pass,
//! and the outward submit seam. Sessions are independent; each screen
//! owns its own and everything is released when the session drops.

mod error_state;

pub use error_state::FieldError;

use crate::rules::RuleSet;
use crate::values;
use crate::values::path::{FieldPath, PathError};
use anyhow::Result;
use async_trait::async_trait;
use error_state::ErrorState;
use serde_json::{Map, Value};
use std::time::Duration;
use uuid::Uuid;

static NULL: Value = Value::Null;

/// What the submit handler wants done with the values afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    /// Leave the submitted values in place
    Keep,
    /// Restore the initial values, ready for the next entry
    Reset,
}

/// Result of a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed and the handler, if any, ran
    Accepted,
    /// Validation failed; the handler was not invoked
    Rejected,
}

/// Outward seam invoked with the values once validation passes
///
/// Failures inside the handler (a rejected network call, say) propagate
/// to the submit caller untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    async fn on_submit(&mut self, values: &Value) -> Result<SubmitAction>;
}

/// Configuration consumed by [`FormSession::new`]
pub struct FormConfig {
    initial_values: Value,
    rules: Box<dyn Fn(&Value) -> RuleSet + Send + Sync>,
    handler: Option<Box<dyn SubmitHandler>>,
    error_ttl: Duration,
}

impl FormConfig {
    /// How long errors stay visible after a failing pass
    pub const DEFAULT_ERROR_TTL: Duration = Duration::from_millis(3000);

    pub fn new() -> Self {
        Self {
            initial_values: Value::Object(Map::new()),
            rules: Box::new(|_| RuleSet::new()),
            handler: None,
            error_ttl: Self::DEFAULT_ERROR_TTL,
        }
    }

    pub fn with_initial_values(mut self, values: Value) -> Self {
        self.initial_values = values;
        self
    }

    /// A rule set declared once and used as-is on every pass
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = Box::new(move |_| rules.clone());
        self
    }

    /// A rule set derived from the current values on every pass,
    /// letting rules read sibling fields
    pub fn with_derived_rules(
        mut self,
        source: impl Fn(&Value) -> RuleSet + Send + Sync + 'static,
    ) -> Self {
        self.rules = Box::new(source);
        self
    }

    pub fn with_submit_handler(mut self, handler: impl SubmitHandler + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn with_error_ttl(mut self, ttl: Duration) -> Self {
        self.error_ttl = ttl;
        self
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One screen's form state and lifecycle
pub struct FormSession {
    id: Uuid,
    initial_values: Value,
    values: Value,
    rules: Box<dyn Fn(&Value) -> RuleSet + Send + Sync>,
    handler: Option<Box<dyn SubmitHandler>>,
    errors: ErrorState,
}

impl FormSession {
    pub fn new(config: FormConfig) -> Self {
        let FormConfig {
            initial_values,
            rules,
            handler,
            error_ttl,
        } = config;
        Self {
            id: Uuid::new_v4(),
            values: initial_values.clone(),
            initial_values,
            rules,
            handler,
            errors: ErrorState::new(error_ttl),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The whole current values record
    pub fn values(&self) -> &Value {
        &self.values
    }

    /// The current value at a field path, if the path parses and resolves
    pub fn value(&self, path: &str) -> Option<&Value> {
        let path = FieldPath::parse(path).ok()?;
        values::get(&self.values, &path)
    }

    /// Set one field by path, creating intermediate containers as
    /// needed and preserving all sibling paths
    pub fn set_value(&mut self, path: &str, value: impl Into<Value>) -> Result<(), PathError> {
        let parsed = FieldPath::parse(path)?;
        values::set(&mut self.values, &parsed, value.into());
        Ok(())
    }

    /// Replace the whole values record, e.g. to merge in externally
    /// fetched data
    pub fn replace_values(&mut self, values: Value) {
        self.values = values;
    }

    /// Run a full validation pass
    ///
    /// Resolves the rules source against the current values and walks
    /// the rules in order. A required rule on an empty value records
    /// its message and moves to the next field; otherwise the field's
    /// checks run in declaration order and the first failure records
    /// its message. The error list is replaced on every pass, including
    /// with the empty list on success.
    pub fn validate(&mut self) -> bool {
        let rules = (self.rules)(&self.values);
        let mut errors = Vec::new();
        for (path, rule) in rules.iter() {
            let parsed = match FieldPath::parse(path) {
                Ok(parsed) => parsed,
                Err(err) => {
                    tracing::warn!(
                        "session {}: skipping rule with bad path `{path}`: {err}",
                        self.id
                    );
                    continue;
                }
            };
            let value = values::get(&self.values, &parsed).unwrap_or(&NULL);
            if rule.required && values::is_empty_value(value) {
                errors.push(FieldError {
                    name: path.to_string(),
                    message: rule.message.clone(),
                });
                continue;
            }
            for check in &rule.checks {
                if !check.passes(value, &self.values) {
                    errors.push(FieldError {
                        name: path.to_string(),
                        message: check.message().to_string(),
                    });
                    break;
                }
            }
        }
        let valid = errors.is_empty();
        tracing::debug!(
            "session {}: validation pass recorded {} error(s)",
            self.id,
            errors.len()
        );
        self.errors.replace(errors);
        valid
    }

    /// Errors from the most recent validation pass; reads as empty once
    /// they expire
    pub fn errors(&self) -> &[FieldError] {
        self.errors.all()
    }

    /// The subsequence of current errors recorded for one field path
    pub fn errors_for<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a FieldError> {
        self.errors.all().iter().filter(move |e| e.name == path)
    }

    /// Drop expired errors; hosts with an event loop call this per frame
    pub fn tick(&mut self) {
        self.errors.tick();
    }

    /// Validate, then drive the submit handler on success
    ///
    /// Returns `Rejected` without touching the handler when validation
    /// fails. Handler errors propagate to the caller.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        if !self.validate() {
            return Ok(SubmitOutcome::Rejected);
        }
        if let Some(handler) = self.handler.as_mut() {
            let action = handler.on_submit(&self.values).await?;
            if action == SubmitAction::Reset {
                self.reset();
            }
        }
        Ok(SubmitOutcome::Accepted)
    }

    /// Restore the values to the record supplied at construction
    pub fn reset(&mut self) {
        self.values = self.initial_values.clone();
    }
}
