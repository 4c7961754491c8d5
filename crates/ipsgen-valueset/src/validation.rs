//! Kind-specific value set validation

use crate::context::ValueSetContext;
use crate::enumeration::EnumValueSet;
use crate::range::RangeValueSet;
use crate::string_length::{LengthLimit, StringLengthValueSet};
use crate::value_set::{ValueSet, ValueSetContent};
use ipsgen_core::{DatatypeKind, Decimal, Message, MessageList, ValueDatatype};
use std::cmp::Ordering;

/// Message codes reported by value set validation
pub mod codes {
    pub const UNKNOWN_DATATYPE: &str = "VALUESET-UNKNOWN_DATATYPE";
    pub const RANGE_NOT_SUPPORTED: &str = "RANGE-NOT_SUPPORTED_FOR_DATATYPE";
    pub const RANGE_LOWER_BOUND_NOT_PARSABLE: &str = "RANGE-LOWER_BOUND_NOT_PARSABLE";
    pub const RANGE_UPPER_BOUND_NOT_PARSABLE: &str = "RANGE-UPPER_BOUND_NOT_PARSABLE";
    pub const RANGE_STEP_NOT_PARSABLE: &str = "RANGE-STEP_NOT_PARSABLE";
    pub const RANGE_LOWER_GREATER_THAN_UPPER: &str = "RANGE-LOWER_BOUND_GREATER_THAN_UPPER_BOUND";
    pub const RANGE_STEP_NOT_POSITIVE: &str = "RANGE-STEP_NOT_POSITIVE";
    pub const RANGE_STEP_MISMATCH: &str = "RANGE-STEP_MISMATCHES_BOUNDS";
    pub const ENUM_VALUE_NOT_PARSABLE: &str = "ENUM-VALUE_NOT_PARSABLE";
    pub const ENUM_DUPLICATE_VALUE: &str = "ENUM-DUPLICATE_VALUE";
    pub const ENUM_NULL_NOT_ALLOWED: &str = "ENUM-NULL_NOT_ALLOWED_FOR_PRIMITIVE";
    pub const STRING_LENGTH_NOT_PARSABLE: &str = "STRINGLENGTH-MAXIMUM_LENGTH_NOT_PARSABLE";
    pub const STRING_LENGTH_WRONG_DATATYPE: &str = "STRINGLENGTH-DATATYPE_NOT_STRING";
}

/// Validates one value set
///
/// Problems are collected as messages. Validators never fail.
pub trait ValueSetValidator {
    fn validate(&self, ctx: &ValueSetContext<'_>) -> MessageList;
}

pub(crate) fn create_validator(value_set: &ValueSet) -> Box<dyn ValueSetValidator + '_> {
    match value_set.content() {
        ValueSetContent::Unrestricted(_) | ValueSetContent::Derived(_) => Box::new(NoConstraintValidator),
        ValueSetContent::Range(range) => Box::new(RangeValidator { value_set, range }),
        ValueSetContent::Enum(set) => Box::new(EnumValidator { value_set, set }),
        ValueSetContent::StringLength(set) => Box::new(StringLengthValidator { value_set, set }),
    }
}

/// Validator for kinds that accept any value.
struct NoConstraintValidator;

impl ValueSetValidator for NoConstraintValidator {
    fn validate(&self, _ctx: &ValueSetContext<'_>) -> MessageList {
        MessageList::new()
    }
}

fn unknown_datatype(value_set: &ValueSet) -> Message {
    Message::error(
        codes::UNKNOWN_DATATYPE,
        format!(
            "The datatype {} of {} cannot be resolved.",
            value_set.owner().datatype,
            value_set.owner().id
        ),
    )
    .with_property(value_set.owner().id.clone(), "datatype")
}

fn property(value_set: &ValueSet, name: &str) -> (String, String) {
    (value_set.owner().id.clone(), format!("valueSet.{name}"))
}

struct RangeValidator<'a> {
    value_set: &'a ValueSet,
    range: &'a RangeValueSet,
}

impl RangeValidator<'_> {
    fn check_parsable(
        &self,
        datatype: &ValueDatatype,
        value: Option<&str>,
        code: &str,
        name: &str,
        messages: &mut MessageList,
    ) -> bool {
        if datatype.is_parsable(value) {
            return true;
        }
        let (object, prop) = property(self.value_set, name);
        messages.add(
            Message::error(
                code,
                format!(
                    "The {name} {} is not a valid {} value.",
                    value.unwrap_or_default(),
                    datatype.qualified_name
                ),
            )
            .with_property(object, prop),
        );
        false
    }
}

impl ValueSetValidator for RangeValidator<'_> {
    fn validate(&self, ctx: &ValueSetContext<'_>) -> MessageList {
        let mut messages = MessageList::new();
        let Some(datatype) = ctx.resolve(&self.value_set.owner().datatype) else {
            messages.add(unknown_datatype(self.value_set));
            return messages;
        };
        if !datatype.supports_ranges() {
            let (object, prop) = property(self.value_set, "kind");
            messages.add(
                Message::error(
                    codes::RANGE_NOT_SUPPORTED,
                    format!("The datatype {} does not support ranges.", datatype.qualified_name),
                )
                .with_property(object, prop),
            );
            return messages;
        }

        let range = self.range;
        let lower_ok = self.check_parsable(
            datatype,
            range.lower_bound.as_deref(),
            codes::RANGE_LOWER_BOUND_NOT_PARSABLE,
            "lowerBound",
            &mut messages,
        );
        let upper_ok = self.check_parsable(
            datatype,
            range.upper_bound.as_deref(),
            codes::RANGE_UPPER_BOUND_NOT_PARSABLE,
            "upperBound",
            &mut messages,
        );
        let step_ok = self.check_parsable(
            datatype,
            range.step.as_deref(),
            codes::RANGE_STEP_NOT_PARSABLE,
            "step",
            &mut messages,
        );
        if !(lower_ok && upper_ok && step_ok) {
            return messages;
        }

        if let (Some(lower), Some(upper)) = (&range.lower_bound, &range.upper_bound)
            && !range.empty
            && datatype.compare(lower, upper) == Some(Ordering::Greater)
        {
            let (object, prop) = property(self.value_set, "lowerBound");
            messages.add(
                Message::error(
                    codes::RANGE_LOWER_GREATER_THAN_UPPER,
                    format!("The lower bound {lower} is greater than the upper bound {upper}."),
                )
                .with_property(object, prop),
            );
        }

        if let Some(step) = &range.step {
            let positive = datatype.decimal_value(step).is_none_or(|s| s > Decimal::ZERO);
            if !positive {
                let (object, prop) = property(self.value_set, "step");
                messages.add(
                    Message::error(
                        codes::RANGE_STEP_NOT_POSITIVE,
                        format!("The step {step} must be greater than zero."),
                    )
                    .with_property(object, prop),
                );
            } else if let (Some(step), Some(lower), Some(upper)) = (
                datatype.integral_value(step),
                range.lower_bound.as_deref().and_then(|v| datatype.integral_value(v)),
                range.upper_bound.as_deref().and_then(|v| datatype.integral_value(v)),
            ) && (i128::from(upper) - i128::from(lower)) % i128::from(step) != 0
            {
                let (object, prop) = property(self.value_set, "step");
                messages.add(
                    Message::error(
                        codes::RANGE_STEP_MISMATCH,
                        format!(
                            "The range {lower}..{upper} cannot be divided into steps of {step}."
                        ),
                    )
                    .with_property(object, prop),
                );
            }
        }
        messages
    }
}

struct EnumValidator<'a> {
    value_set: &'a ValueSet,
    set: &'a EnumValueSet,
}

impl ValueSetValidator for EnumValidator<'_> {
    fn validate(&self, ctx: &ValueSetContext<'_>) -> MessageList {
        let mut messages = MessageList::new();
        let Some(datatype) = ctx.resolve(&self.value_set.owner().datatype) else {
            messages.add(unknown_datatype(self.value_set));
            return messages;
        };
        let (object, prop) = property(self.value_set, "values");

        for value in self.set.non_null_values() {
            if !datatype.is_parsable(Some(value)) {
                messages.add(
                    Message::error(
                        codes::ENUM_VALUE_NOT_PARSABLE,
                        format!(
                            "The value {value} is not a valid {} value.",
                            datatype.qualified_name
                        ),
                    )
                    .with_property(object.clone(), prop.clone()),
                );
            }
        }

        for duplicate in self.set.duplicates(datatype) {
            messages.add(
                Message::error(
                    codes::ENUM_DUPLICATE_VALUE,
                    format!(
                        "The value {} is listed more than once.",
                        duplicate.unwrap_or("<null>")
                    ),
                )
                .with_property(object.clone(), prop.clone()),
            );
        }

        if datatype.is_primitive() && self.set.contains_null_entry() {
            messages.add(
                Message::error(
                    codes::ENUM_NULL_NOT_ALLOWED,
                    format!(
                        "The primitive datatype {} does not allow null.",
                        datatype.qualified_name
                    ),
                )
                .with_property(object, prop),
            );
        }
        messages
    }
}

struct StringLengthValidator<'a> {
    value_set: &'a ValueSet,
    set: &'a StringLengthValueSet,
}

impl ValueSetValidator for StringLengthValidator<'_> {
    fn validate(&self, ctx: &ValueSetContext<'_>) -> MessageList {
        let mut messages = MessageList::new();
        match ctx.resolve(&self.value_set.owner().datatype) {
            None => messages.add(unknown_datatype(self.value_set)),
            Some(datatype) if datatype.kind != DatatypeKind::String => {
                let (object, prop) = property(self.value_set, "kind");
                messages.add(
                    Message::error(
                        codes::STRING_LENGTH_WRONG_DATATYPE,
                        format!(
                            "String length value sets require the String datatype, not {}.",
                            datatype.qualified_name
                        ),
                    )
                    .with_property(object, prop),
                );
            }
            Some(_) => {}
        }
        if self.set.limit() == LengthLimit::Invalid {
            let (object, prop) = property(self.value_set, "maximumLength");
            messages.add(
                Message::error(
                    codes::STRING_LENGTH_NOT_PARSABLE,
                    format!(
                        "The maximum length {} is not a non-negative integer.",
                        self.set.maximum_length.as_deref().unwrap_or_default()
                    ),
                )
                .with_property(object, prop),
            );
        }
        messages
    }
}
