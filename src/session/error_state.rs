//! Validation errors and their expiry deadline

use std::time::{Duration, Instant};

/// A single validation failure, produced by a validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field path the error belongs to
    pub name: String,
    pub message: String,
}

/// Error list from the most recent validation pass
///
/// Installing a non-empty list arms an expiry deadline; installing a
/// new list re-arms it and an empty list disarms it. Reads past the
/// deadline see an empty list whether or not the host ever polls.
#[derive(Debug)]
pub(crate) struct ErrorState {
    errors: Vec<FieldError>,
    expires_at: Option<Instant>,
    ttl: Duration,
}

impl ErrorState {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            errors: Vec::new(),
            expires_at: None,
            ttl,
        }
    }

    /// Replace the whole list, re-arming or disarming the deadline
    pub(crate) fn replace(&mut self, errors: Vec<FieldError>) {
        self.expires_at = if errors.is_empty() {
            None
        } else {
            Some(Instant::now() + self.ttl)
        };
        self.errors = errors;
    }

    /// Current errors; empty once the deadline has passed
    pub(crate) fn all(&self) -> &[FieldError] {
        if self.expired() {
            &[]
        } else {
            &self.errors
        }
    }

    /// Physically drop expired errors; for hosts with an event loop
    pub(crate) fn tick(&mut self) {
        if self.expired() {
            self.errors.clear();
            self.expires_at = None;
        }
    }

    fn expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}
