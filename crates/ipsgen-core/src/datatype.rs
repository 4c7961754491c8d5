//! Value datatypes and the datatype registry
//!
//! Value sets only ever store string representations of values. The
//! datatype of the owning element decides how those strings are parsed and
//! ordered. Decimal and money amounts are compared exactly, up to the 28
//! significant digits of [`Decimal`]; longer literals are not parsable.
//!
//! | Qualified name | Kind | Java class | Ordered |
//! |----------------|------|------------|---------|
//! | `String` | String | `java.lang.String` | no |
//! | `Integer` | Integer | `java.lang.Integer` | yes |
//! | `Long` | Long | `java.lang.Long` | yes |
//! | `Decimal` | Decimal | `org.faktorips.values.Decimal` | yes |
//! | `Money` | Money | `org.faktorips.values.Money` | yes (same currency) |
//! | `Boolean` | Boolean | `java.lang.Boolean` | no |
//! | `LocalDate` | GregorianDate | `java.time.LocalDate` | yes |
//! | `int` / `long` / `boolean` | primitives | `int` / `long` / `boolean` | like their wrapper |

use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The kind of a value datatype
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum DatatypeKind {
    String,
    Integer,
    Long,
    Decimal,
    Money,
    Boolean,
    GregorianDate,
    PrimitiveInt,
    PrimitiveLong,
    PrimitiveBoolean,
    Enum,
}

impl DatatypeKind {
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            DatatypeKind::PrimitiveInt | DatatypeKind::PrimitiveLong | DatatypeKind::PrimitiveBoolean
        )
    }

    /// Kinds whose values have a natural order and can therefore be
    /// restricted by a range.
    pub fn supports_ranges(self) -> bool {
        matches!(
            self,
            DatatypeKind::Integer
                | DatatypeKind::Long
                | DatatypeKind::Decimal
                | DatatypeKind::Money
                | DatatypeKind::GregorianDate
                | DatatypeKind::PrimitiveInt
                | DatatypeKind::PrimitiveLong
        )
    }

    pub fn is_integral(self) -> bool {
        matches!(
            self,
            DatatypeKind::Integer
                | DatatypeKind::Long
                | DatatypeKind::PrimitiveInt
                | DatatypeKind::PrimitiveLong
        )
    }
}

/// A datatype values of attributes and enum attributes can have
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueDatatype {
    pub qualified_name: String,
    pub kind: DatatypeKind,

    /// Fully qualified Java type used in generated code.
    pub java_class: String,

    /// Supertype for enum datatypes.
    #[serde(default)]
    pub supertype: Option<String>,

    /// Known value ids for enum datatypes. `None` for extensible enums
    /// whose values live in separate contents.
    #[serde(default)]
    pub values: Option<Vec<String>>,
}

impl ValueDatatype {
    pub fn builtin(qualified_name: &str, kind: DatatypeKind, java_class: &str) -> Self {
        Self {
            qualified_name: qualified_name.to_string(),
            kind,
            java_class: java_class.to_string(),
            supertype: None,
            values: None,
        }
    }

    /// An enum datatype backed by an enum type of the model.
    pub fn enumeration(
        qualified_name: impl Into<String>,
        java_class: impl Into<String>,
        supertype: Option<String>,
        values: Option<Vec<String>>,
    ) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind: DatatypeKind::Enum,
            java_class: java_class.into(),
            supertype,
            values,
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.kind.is_primitive()
    }

    pub fn is_enum(&self) -> bool {
        self.kind == DatatypeKind::Enum
    }

    pub fn supports_ranges(&self) -> bool {
        self.kind.supports_ranges()
    }

    /// Simple Java class name, e.g. `Money` for `org.faktorips.values.Money`.
    pub fn java_simple_name(&self) -> &str {
        crate::naming::simple_name(&self.java_class)
    }

    /// Whether `value` is a valid string representation for this datatype.
    ///
    /// `None` stands for null and is parsable for every datatype; whether a
    /// null is admissible is decided by the value set, not the datatype.
    pub fn is_parsable(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return true;
        };
        match self.kind {
            DatatypeKind::String => true,
            DatatypeKind::Integer | DatatypeKind::PrimitiveInt => value.trim().parse::<i32>().is_ok(),
            DatatypeKind::Long | DatatypeKind::PrimitiveLong => value.trim().parse::<i64>().is_ok(),
            DatatypeKind::Decimal => parse_decimal(value).is_some(),
            DatatypeKind::Money => parse_money(value).is_some(),
            DatatypeKind::Boolean | DatatypeKind::PrimitiveBoolean => {
                matches!(value.trim(), "true" | "false")
            }
            DatatypeKind::GregorianDate => parse_date(value).is_some(),
            DatatypeKind::Enum => match &self.values {
                Some(values) => values.iter().any(|v| v == value),
                None => !value.is_empty(),
            },
        }
    }

    /// Compare two non-null values. Returns `None` if either value is not
    /// parsable or the datatype has no order.
    pub fn compare(&self, a: &str, b: &str) -> Option<Ordering> {
        match self.kind {
            DatatypeKind::Integer
            | DatatypeKind::PrimitiveInt
            | DatatypeKind::Long
            | DatatypeKind::PrimitiveLong => {
                let a = a.trim().parse::<i64>().ok()?;
                let b = b.trim().parse::<i64>().ok()?;
                Some(a.cmp(&b))
            }
            DatatypeKind::Decimal => Some(parse_decimal(a)?.cmp(&parse_decimal(b)?)),
            DatatypeKind::Money => {
                let (amount_a, currency_a) = parse_money(a)?;
                let (amount_b, currency_b) = parse_money(b)?;
                if currency_a != currency_b {
                    return None;
                }
                Some(amount_a.cmp(&amount_b))
            }
            DatatypeKind::GregorianDate => Some(parse_date(a)?.cmp(&parse_date(b)?)),
            _ => None,
        }
    }

    /// Whether two string representations denote the same value.
    pub fn are_values_equal(&self, a: Option<&str>, b: Option<&str>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => match self.compare(a, b) {
                Some(ordering) => ordering == Ordering::Equal,
                None => a == b,
            },
            _ => false,
        }
    }

    /// Numeric value of an integral datatype, used for step checks.
    pub fn integral_value(&self, value: &str) -> Option<i64> {
        if self.kind.is_integral() {
            value.trim().parse::<i64>().ok()
        } else {
            None
        }
    }

    /// Exact numeric value of any number-like datatype; money yields its
    /// amount.
    pub fn decimal_value(&self, value: &str) -> Option<Decimal> {
        match self.kind {
            kind if kind.is_integral() => value.trim().parse::<i64>().ok().map(Decimal::from),
            DatatypeKind::Decimal => parse_decimal(value),
            DatatypeKind::Money => parse_money(value).map(|(amount, _)| amount),
            _ => None,
        }
    }
}

/// Registry resolving datatype qualified names
///
/// The registry starts with the built-in datatypes; the model adds one enum
/// datatype per enum type of a project.
#[derive(Debug, Clone)]
pub struct DatatypeRegistry {
    datatypes: IndexMap<String, ValueDatatype>,
}

impl Default for DatatypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl DatatypeRegistry {
    /// Registry without any datatype, mostly useful for tests of broken references.
    pub fn empty() -> Self {
        Self {
            datatypes: IndexMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for datatype in [
            ValueDatatype::builtin("String", DatatypeKind::String, "java.lang.String"),
            ValueDatatype::builtin("Integer", DatatypeKind::Integer, "java.lang.Integer"),
            ValueDatatype::builtin("Long", DatatypeKind::Long, "java.lang.Long"),
            ValueDatatype::builtin("Decimal", DatatypeKind::Decimal, "org.faktorips.values.Decimal"),
            ValueDatatype::builtin("Money", DatatypeKind::Money, "org.faktorips.values.Money"),
            ValueDatatype::builtin("Boolean", DatatypeKind::Boolean, "java.lang.Boolean"),
            ValueDatatype::builtin("LocalDate", DatatypeKind::GregorianDate, "java.time.LocalDate"),
            ValueDatatype::builtin("int", DatatypeKind::PrimitiveInt, "int"),
            ValueDatatype::builtin("long", DatatypeKind::PrimitiveLong, "long"),
            ValueDatatype::builtin("boolean", DatatypeKind::PrimitiveBoolean, "boolean"),
        ] {
            registry.register(datatype);
        }
        registry
    }

    /// Register or replace a datatype.
    pub fn register(&mut self, datatype: ValueDatatype) {
        self.datatypes
            .insert(datatype.qualified_name.clone(), datatype);
    }

    pub fn resolve(&self, qualified_name: &str) -> Option<&ValueDatatype> {
        self.datatypes.get(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.datatypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datatypes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValueDatatype> {
        self.datatypes.values()
    }

    /// Whether values of `sub` can be assigned where `sup` is expected.
    ///
    /// Covers identity, primitive to wrapper and the enum supertype chain.
    pub fn is_covariant(&self, sub: &ValueDatatype, sup: &ValueDatatype) -> bool {
        if sub.qualified_name == sup.qualified_name {
            return true;
        }
        let wrapper_pair = matches!(
            (sub.kind, sup.kind),
            (DatatypeKind::PrimitiveInt, DatatypeKind::Integer)
                | (DatatypeKind::PrimitiveLong, DatatypeKind::Long)
                | (DatatypeKind::PrimitiveBoolean, DatatypeKind::Boolean)
        );
        if wrapper_pair {
            return true;
        }
        if sub.is_enum() && sup.is_enum() {
            let mut current = sub.supertype.as_deref();
            let mut visited = 0usize;
            while let Some(name) = current {
                if name == sup.qualified_name {
                    return true;
                }
                visited += 1;
                if visited > self.datatypes.len() {
                    // cyclic supertype chain
                    return false;
                }
                current = self.resolve(name).and_then(|d| d.supertype.as_deref());
            }
        }
        false
    }
}

/// Parse a decimal literal of the form `-12.345`. Exponents, `NaN`,
/// infinities and literals that would lose digits are rejected.
fn parse_decimal(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    let negative = trimmed.starts_with('-');
    let digits = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
    if digits.is_empty() {
        return None;
    }
    let mut parts = digits.splitn(2, '.');
    let int_part = parts.next().unwrap_or_default();
    let frac_part = parts.next();
    let int_ok = !int_part.is_empty() && int_part.chars().all(|c| c.is_ascii_digit());
    let frac_ok = frac_part.is_none_or(|f| !f.is_empty() && f.chars().all(|c| c.is_ascii_digit()));
    if !(int_ok && frac_ok) {
        return None;
    }
    let magnitude = Decimal::from_str_exact(digits).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse `10.00 EUR` into amount and ISO currency code.
fn parse_money(value: &str) -> Option<(Decimal, &str)> {
    let (amount, currency) = value.trim().rsplit_once(' ')?;
    let currency_ok = currency.len() == 3 && currency.chars().all(|c| c.is_ascii_uppercase());
    if !currency_ok {
        return None;
    }
    Some((parse_decimal(amount)?, currency))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
