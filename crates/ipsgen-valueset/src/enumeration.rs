//! Value sets listing their members explicitly

use ipsgen_core::ValueDatatype;
use serde::{Deserialize, Serialize};

/// An explicit, ordered list of values
///
/// Null is a member exactly when the list holds a `None` entry. In project
/// files the list is written as plain strings plus a `contains_null` flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EnumValueSetRepr", into = "EnumValueSetRepr")]
pub struct EnumValueSet {
    values: Vec<Option<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EnumValueSetRepr {
    #[serde(default)]
    values: Vec<String>,
    #[serde(default)]
    contains_null: bool,
}

impl From<EnumValueSetRepr> for EnumValueSet {
    fn from(repr: EnumValueSetRepr) -> Self {
        let mut values: Vec<Option<String>> = repr.values.into_iter().map(Some).collect();
        if repr.contains_null {
            values.push(None);
        }
        Self { values }
    }
}

impl From<EnumValueSet> for EnumValueSetRepr {
    fn from(set: EnumValueSet) -> Self {
        let contains_null = set.contains_null_entry();
        Self {
            values: set.values.into_iter().flatten().collect(),
            contains_null,
        }
    }
}

impl EnumValueSet {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(|v| v.map(Into::into)).collect(),
        }
    }

    /// Enum value set of non-null values only.
    pub fn of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(|v| Some(v.into())).collect(),
        }
    }

    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    pub fn non_null_values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().filter_map(|v| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains_null_entry(&self) -> bool {
        self.values.iter().any(Option::is_none)
    }

    pub(crate) fn add_value(&mut self, value: Option<String>) {
        self.values.push(value);
    }

    pub(crate) fn remove_value(&mut self, value: Option<&str>) -> bool {
        let before = self.values.len();
        self.values.retain(|v| v.as_deref() != value);
        before != self.values.len()
    }

    /// Add or drop the null entry. Returns whether anything changed.
    pub(crate) fn set_contains_null(&mut self, contains_null: bool) -> bool {
        match (contains_null, self.contains_null_entry()) {
            (true, false) => {
                self.values.push(None);
                true
            }
            (false, true) => {
                self.values.retain(Option::is_some);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn contains_non_null(&self, value: &str, datatype: &ValueDatatype) -> bool {
        self.non_null_values()
            .any(|v| datatype.are_values_equal(Some(v), Some(value)))
    }

    /// Values listed more than once, each reported once in listing order.
    pub(crate) fn duplicates(&self, datatype: &ValueDatatype) -> Vec<Option<&str>> {
        let mut duplicates: Vec<Option<&str>> = Vec::new();
        for (index, value) in self.values.iter().enumerate() {
            let value = value.as_deref();
            let repeated = self.values[..index]
                .iter()
                .any(|earlier| datatype.are_values_equal(earlier.as_deref(), value));
            let reported = duplicates
                .iter()
                .any(|seen| datatype.are_values_equal(*seen, value));
            if repeated && !reported {
                duplicates.push(value);
            }
        }
        duplicates
    }

    /// Larger sets sort first, then by the listed values.
    pub(crate) fn compare(&self, other: &Self) -> i32 {
        match other
            .values
            .len()
            .cmp(&self.values.len())
            .then_with(|| self.values.cmp(&other.values))
        {
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Greater => 1,
        }
    }
}
