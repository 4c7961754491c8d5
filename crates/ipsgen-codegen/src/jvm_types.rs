//! JVM type mappings for model datatypes.
//!
//! Every value datatype maps to one Java type. Primitive datatypes keep
//! their wrapper around for places where null must be representable.
//!
//! # Type Mappings
//!
//! | Datatype | Java (non-null) | Java (nullable) | Literal for `v` |
//! |----------|-----------------|-----------------|-----------------|
//! | `String` | `String` | `String` | `"v"` |
//! | `Integer` | `Integer` | `Integer` | `Integer.valueOf(v)` |
//! | `int` | `int` | `Integer` | `v` |
//! | `Long` / `long` | `Long` / `long` | `Long` | `Long.valueOf(vL)` / `vL` |
//! | `Decimal` | `Decimal` | `Decimal` | `Decimal.valueOf("v")` |
//! | `Money` | `Money` | `Money` | `Money.valueOf("v")` |
//! | `Boolean` / `boolean` | `Boolean` / `boolean` | `Boolean` | `Boolean.TRUE` / `true` |
//! | `LocalDate` | `LocalDate` | `LocalDate` | `LocalDate.parse("v")` |
//! | enum | enum class | enum class | `Enum.getValueById("v")` |

use crate::fragment::{JavaCodeFragment, JavaCodeFragmentBuilder, quote};
use ipsgen_core::{DatatypeKind, ValueDatatype};

/// Represents a JVM type with both primitive and boxed forms.
#[derive(Debug, Clone, PartialEq)]
pub struct JvmType {
    /// The primitive type name (e.g., "int", "boolean") or qualified class name.
    pub primitive: String,
    /// The qualified wrapper class (e.g., "java.lang.Integer").
    pub boxed: String,
    /// Whether this type is a primitive.
    pub is_primitive: bool,
}

impl JvmType {
    /// Create a reference type usable in both forms.
    pub fn reference(qualified_name: &str) -> Self {
        Self {
            primitive: qualified_name.to_string(),
            boxed: qualified_name.to_string(),
            is_primitive: false,
        }
    }

    /// Create a new JVM primitive type.
    pub fn primitive(primitive: &str, boxed: &str) -> Self {
        Self {
            primitive: primitive.to_string(),
            boxed: boxed.to_string(),
            is_primitive: true,
        }
    }

    /// Get the appropriate Java type.
    ///
    /// Nullable positions get the boxed type, everything else keeps the
    /// primitive.
    pub fn java_type(&self, nullable: bool) -> &str {
        if nullable && self.is_primitive {
            &self.boxed
        } else {
            &self.primitive
        }
    }

    /// Simple name of [`JvmType::java_type`].
    pub fn simple_name(&self, nullable: bool) -> &str {
        ipsgen_core::naming::simple_name(self.java_type(nullable))
    }
}

/// Map a value datatype to a JVM type.
pub fn map_datatype(datatype: &ValueDatatype) -> JvmType {
    match datatype.kind {
        DatatypeKind::PrimitiveInt => JvmType::primitive("int", "java.lang.Integer"),
        DatatypeKind::PrimitiveLong => JvmType::primitive("long", "java.lang.Long"),
        DatatypeKind::PrimitiveBoolean => JvmType::primitive("boolean", "java.lang.Boolean"),
        _ => JvmType::reference(&datatype.java_class),
    }
}

/// Java expression producing `value` for the datatype.
///
/// Null becomes `null` for reference types and the default value for
/// primitives.
pub fn java_literal(datatype: &ValueDatatype, value: Option<&str>) -> JavaCodeFragment {
    let mut code = JavaCodeFragmentBuilder::new();
    let Some(value) = value else {
        code.append(match datatype.kind {
            DatatypeKind::PrimitiveInt => "0",
            DatatypeKind::PrimitiveLong => "0L",
            DatatypeKind::PrimitiveBoolean => "false",
            _ => "null",
        });
        return code.build();
    };
    let value = if datatype.kind == DatatypeKind::String {
        value
    } else {
        value.trim()
    };

    match datatype.kind {
        DatatypeKind::String => {
            code.append_quoted(value);
        }
        DatatypeKind::PrimitiveInt => {
            code.append(value);
        }
        DatatypeKind::PrimitiveLong => {
            code.append(&format!("{value}L"));
        }
        DatatypeKind::PrimitiveBoolean => {
            code.append(value);
        }
        DatatypeKind::Integer => {
            code.append(&format!("Integer.valueOf({value})"));
        }
        DatatypeKind::Long => {
            code.append(&format!("Long.valueOf({value}L)"));
        }
        DatatypeKind::Boolean => {
            code.append(if value == "true" {
                "Boolean.TRUE"
            } else {
                "Boolean.FALSE"
            });
        }
        DatatypeKind::Decimal | DatatypeKind::Money => {
            code.append_class_name(&datatype.java_class)
                .append(".valueOf(")
                .append_quoted(value)
                .append(")");
        }
        DatatypeKind::GregorianDate => {
            code.append_class_name(&datatype.java_class)
                .append(".parse(")
                .append_quoted(value)
                .append(")");
        }
        DatatypeKind::Enum => {
            code.append_class_name(&datatype.java_class)
                .append(".getValueById(")
                .append(&quote(value))
                .append(")");
        }
    }
    code.build()
}
