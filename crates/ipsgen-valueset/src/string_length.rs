//! Value sets bounding the length of strings

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Strings up to a maximum number of characters
///
/// The limit is stored as entered so that invalid input survives until
/// validation reports it. No limit means any length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringLengthValueSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_length: Option<String>,

    #[serde(default = "default_true")]
    pub contains_null: bool,
}

impl Default for StringLengthValueSet {
    fn default() -> Self {
        Self {
            maximum_length: None,
            contains_null: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LengthLimit {
    Unlimited,
    Max(usize),
    Invalid,
}

impl StringLengthValueSet {
    pub fn new(maximum_length: Option<usize>) -> Self {
        Self {
            maximum_length: maximum_length.map(|len| len.to_string()),
            contains_null: true,
        }
    }

    #[must_use]
    pub fn with_contains_null(mut self, contains_null: bool) -> Self {
        self.contains_null = contains_null;
        self
    }

    /// The parsed limit, `None` when unlimited or invalid.
    pub fn maximum(&self) -> Option<usize> {
        match self.limit() {
            LengthLimit::Max(max) => Some(max),
            _ => None,
        }
    }

    pub(crate) fn limit(&self) -> LengthLimit {
        match self.maximum_length.as_deref().map(str::trim) {
            None | Some("") => LengthLimit::Unlimited,
            Some(text) => text
                .parse::<usize>()
                .map(LengthLimit::Max)
                .unwrap_or(LengthLimit::Invalid),
        }
    }

    pub(crate) fn contains_non_null(&self, value: &str) -> bool {
        match self.limit() {
            LengthLimit::Unlimited => true,
            LengthLimit::Max(max) => value.chars().count() <= max,
            LengthLimit::Invalid => false,
        }
    }

    pub(crate) fn contains_string_length(&self, other: &StringLengthValueSet) -> bool {
        match (self.limit(), other.limit()) {
            (LengthLimit::Invalid, _) | (_, LengthLimit::Invalid) => false,
            (LengthLimit::Unlimited, _) => true,
            (LengthLimit::Max(_), LengthLimit::Unlimited) => false,
            (LengthLimit::Max(max), LengthLimit::Max(sub)) => sub <= max,
        }
    }

    /// Unlimited sorts first, then longer limits before shorter ones.
    pub(crate) fn compare(&self, other: &Self) -> i32 {
        let rank = |limit: LengthLimit| match limit {
            LengthLimit::Unlimited => (0, 0),
            LengthLimit::Max(max) => (1, usize::MAX - max),
            LengthLimit::Invalid => (2, 0),
        };
        match rank(self.limit()).cmp(&rank(other.limit())) {
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Greater => 1,
            std::cmp::Ordering::Equal => match (self.contains_null, other.contains_null) {
                (true, false) => -1,
                (false, true) => 1,
                _ => 0,
            },
        }
    }
}

#[cfg(test)]
#[path = "string_length/string_length_tests.rs"]
mod string_length_tests;
