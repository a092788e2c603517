//! Reusable validation predicates
//!
//! Plain predicates over strings and numbers, each with a counterpart
//! returning a [`Check`] so rule sets read declaratively. Clock and
//! calendar formats go through chrono rather than hand-rolled parsing.

use crate::rules::Check;
use chrono::{NaiveDate, NaiveTime};

/// Minimal email shape: one `@`, a non-empty local part, a dotted
/// domain with an alphabetic TLD of at least two letters, no whitespace
pub fn is_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && !host.starts_with('.')
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Exactly 10 ASCII digits
pub fn is_mobile_number(s: &str) -> bool {
    s.len() == 10 && all_ascii_digits(s)
}

/// 4 to 6 ASCII digits
pub fn is_otp(s: &str) -> bool {
    (4..=6).contains(&s.len()) && all_ascii_digits(s)
}

/// Exactly 6 ASCII digits
pub fn is_pin_code(s: &str) -> bool {
    s.len() == 6 && all_ascii_digits(s)
}

/// 12-hour clock time, e.g. `09:30 AM`
pub fn is_time_12h(s: &str) -> bool {
    NaiveTime::parse_from_str(s, "%I:%M %p").is_ok()
}

/// ISO calendar date, e.g. `2026-08-05`
pub fn is_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn all_ascii_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// String value with at least `min` characters
pub fn min_length(min: usize, message: impl Into<String>) -> Check {
    Check::new(message, move |value, _| {
        value.as_str().map_or(false, |s| s.chars().count() >= min)
    })
}

/// String value with at most `max` characters
pub fn max_length(max: usize, message: impl Into<String>) -> Check {
    Check::new(message, move |value, _| {
        value.as_str().map_or(false, |s| s.chars().count() <= max)
    })
}

/// Numeric value of at least `min`; non-numbers fail
pub fn min(min: f64, message: impl Into<String>) -> Check {
    Check::new(message, move |value, _| {
        value.as_f64().map_or(false, |v| v >= min)
    })
}

/// Numeric value of at most `max`; non-numbers fail
pub fn max(max: f64, message: impl Into<String>) -> Check {
    Check::new(message, move |value, _| {
        value.as_f64().map_or(false, |v| v <= max)
    })
}

pub fn email(message: impl Into<String>) -> Check {
    string_check(message, is_email)
}

pub fn mobile_number(message: impl Into<String>) -> Check {
    string_check(message, is_mobile_number)
}

pub fn otp(message: impl Into<String>) -> Check {
    string_check(message, is_otp)
}

pub fn pin_code(message: impl Into<String>) -> Check {
    string_check(message, is_pin_code)
}

pub fn time_12h(message: impl Into<String>) -> Check {
    string_check(message, is_time_12h)
}

pub fn date(message: impl Into<String>) -> Check {
    string_check(message, is_date)
}

fn string_check(message: impl Into<String>, predicate: fn(&str) -> bool) -> Check {
    Check::new(message, move |value, _| {
        value.as_str().map_or(false, predicate)
    })
}
