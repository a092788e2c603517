//! Field path parsing
//!
//! A field path names one location inside a nested values record,
//! e.g. `address.city` or `skills[2].skill_id`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One step of a field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object key, e.g. `city` in `address.city`
    Key(String),
    /// Array index, e.g. `2` in `skills[2]`
    Index(usize),
}

/// Errors produced while parsing a field path
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("empty field path")]
    Empty,
    #[error("empty key at byte {0} in field path")]
    EmptyKey(usize),
    #[error("invalid array index `{0}` in field path")]
    BadIndex(String),
    #[error("unterminated `[` in field path")]
    UnterminatedIndex,
    #[error("unexpected `{ch}` at byte {at} in field path")]
    Unexpected { ch: char, at: usize },
}

/// A parsed field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Parse a dotted/bracketed path string into segments
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }
        let mut segments = Vec::new();
        let mut it = raw.char_indices().peekable();
        // Set after consuming a `.`; a segment must follow before the end
        let mut pending_segment = false;
        while let Some(&(at, ch)) = it.peek() {
            match ch {
                '.' => return Err(PathError::EmptyKey(at)),
                ']' => return Err(PathError::Unexpected { ch, at }),
                '[' => {
                    it.next();
                    let mut digits = String::new();
                    loop {
                        match it.next() {
                            Some((_, ']')) => break,
                            Some((_, c)) => digits.push(c),
                            None => return Err(PathError::UnterminatedIndex),
                        }
                    }
                    let index = digits
                        .parse::<usize>()
                        .map_err(|_| PathError::BadIndex(digits.clone()))?;
                    segments.push(Segment::Index(index));
                    pending_segment = false;
                    match it.peek() {
                        Some(&(_, '.')) => {
                            it.next();
                            pending_segment = true;
                        }
                        Some(&(_, '[')) | None => {}
                        Some(&(at2, c2)) => return Err(PathError::Unexpected { ch: c2, at: at2 }),
                    }
                }
                _ => {
                    let mut key = String::new();
                    while let Some(&(at2, c)) = it.peek() {
                        match c {
                            '.' | '[' => break,
                            ']' => return Err(PathError::Unexpected { ch: c, at: at2 }),
                            _ => {
                                key.push(c);
                                it.next();
                            }
                        }
                    }
                    segments.push(Segment::Key(key));
                    pending_segment = false;
                    if let Some(&(_, '.')) = it.peek() {
                        it.next();
                        pending_segment = true;
                    }
                }
            }
        }
        if pending_segment {
            return Err(PathError::EmptyKey(raw.len()));
        }
        Ok(Self { segments })
    }

    /// The parsed segments, in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
