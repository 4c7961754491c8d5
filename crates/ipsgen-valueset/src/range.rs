//! Value sets bounded by a lower and an upper value

use ipsgen_core::{Decimal, ValueDatatype};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

fn default_true() -> bool {
    true
}

/// An interval of an ordered datatype with an optional step
///
/// Missing bounds are open. Bounds are kept as entered so that unparsable
/// input survives until validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeValueSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,

    #[serde(default = "default_true")]
    pub contains_null: bool,

    /// Explicitly empty range, independent of the bounds.
    #[serde(default)]
    pub empty: bool,
}

impl Default for RangeValueSet {
    fn default() -> Self {
        Self {
            lower_bound: None,
            upper_bound: None,
            step: None,
            contains_null: true,
            empty: false,
        }
    }
}

impl RangeValueSet {
    pub fn new(lower_bound: Option<&str>, upper_bound: Option<&str>, step: Option<&str>) -> Self {
        Self {
            lower_bound: lower_bound.map(str::to_string),
            upper_bound: upper_bound.map(str::to_string),
            step: step.map(str::to_string),
            ..Self::default()
        }
    }

    /// A range without any members.
    pub fn empty() -> Self {
        Self {
            empty: true,
            contains_null: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_contains_null(mut self, contains_null: bool) -> Self {
        self.contains_null = contains_null;
        self
    }

    /// Explicitly empty, or the lower bound lies above the upper bound.
    pub fn is_empty_for(&self, datatype: &ValueDatatype) -> bool {
        if self.empty {
            return true;
        }
        match (&self.lower_bound, &self.upper_bound) {
            (Some(lower), Some(upper)) => datatype.compare(lower, upper) == Some(Ordering::Greater),
            _ => false,
        }
    }

    pub(crate) fn contains_non_null(&self, value: &str, datatype: &ValueDatatype) -> bool {
        if self.empty {
            return false;
        }
        if let Some(lower) = &self.lower_bound {
            match datatype.compare(value, lower) {
                Some(Ordering::Less) | None => return false,
                _ => {}
            }
        }
        if let Some(upper) = &self.upper_bound {
            match datatype.compare(value, upper) {
                Some(Ordering::Greater) | None => return false,
                _ => {}
            }
        }
        match &self.step {
            Some(step) => self.is_on_step(value, step, datatype),
            None => true,
        }
    }

    /// Whether `value` is reachable from the lower bound (or the upper
    /// bound, or zero) in whole steps.
    fn is_on_step(&self, value: &str, step: &str, datatype: &ValueDatatype) -> bool {
        let base = self
            .lower_bound
            .as_deref()
            .or(self.upper_bound.as_deref());
        if let Some(step) = datatype.integral_value(step) {
            if step <= 0 {
                return false;
            }
            let base = base.and_then(|b| datatype.integral_value(b)).unwrap_or(0);
            return datatype
                .integral_value(value)
                .is_some_and(|v| (i128::from(v) - i128::from(base)) % i128::from(step) == 0);
        }
        let Some(step) = datatype.decimal_value(step) else {
            // dates and other ordered types without arithmetic ignore the step
            return true;
        };
        if step <= Decimal::ZERO {
            return false;
        }
        let base = base
            .and_then(|b| datatype.decimal_value(b))
            .unwrap_or(Decimal::ZERO);
        datatype
            .decimal_value(value)
            .and_then(|v| v.checked_sub(base))
            .and_then(|distance| distance.checked_rem(step))
            .is_some_and(|rest| rest.is_zero())
    }

    pub(crate) fn contains_range(&self, sub: &RangeValueSet, datatype: &ValueDatatype) -> bool {
        if sub.is_empty_for(datatype) {
            return true;
        }
        if self.is_empty_for(datatype) {
            return false;
        }
        if let Some(lower) = &self.lower_bound {
            let Some(sub_lower) = &sub.lower_bound else {
                return false;
            };
            if !matches!(
                datatype.compare(sub_lower, lower),
                Some(Ordering::Greater | Ordering::Equal)
            ) {
                return false;
            }
        }
        if let Some(upper) = &self.upper_bound {
            let Some(sub_upper) = &sub.upper_bound else {
                return false;
            };
            if !matches!(
                datatype.compare(sub_upper, upper),
                Some(Ordering::Less | Ordering::Equal)
            ) {
                return false;
            }
        }
        let Some(step) = &self.step else {
            return true;
        };
        let Some(sub_step) = &sub.step else {
            return false;
        };
        let aligned = sub
            .lower_bound
            .as_deref()
            .or(sub.upper_bound.as_deref())
            .is_none_or(|anchor| self.is_on_step(anchor, step, datatype));
        let step_multiple = match (datatype.integral_value(step), datatype.integral_value(sub_step)) {
            (Some(step), Some(sub_step)) => step > 0 && sub_step % step == 0,
            _ => match (datatype.decimal_value(step), datatype.decimal_value(sub_step)) {
                (Some(step), Some(sub_step)) if step > Decimal::ZERO => sub_step
                    .checked_rem(step)
                    .is_some_and(|rest| rest.is_zero()),
                _ => datatype.are_values_equal(Some(step), Some(sub_step)),
            },
        };
        aligned && step_multiple
    }

    /// Orders by lower bound (open first), upper bound (open first), step
    /// and null flag. Bounds compare numerically where they parse.
    pub(crate) fn compare(&self, other: &Self) -> i32 {
        let ordering = compare_bound(&self.lower_bound, &other.lower_bound)
            .then_with(|| compare_bound(&self.upper_bound, &other.upper_bound))
            .then_with(|| compare_bound(&self.step, &other.step))
            .then_with(|| other.contains_null.cmp(&self.contains_null))
            .then_with(|| self.empty.cmp(&other.empty));
        match ordering {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }
}

fn compare_bound(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (
            Decimal::from_str_exact(a.trim()),
            Decimal::from_str_exact(b.trim()),
        ) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            _ => a.cmp(b),
        },
    }
}
