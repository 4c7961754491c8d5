//! Java expressions constructing runtime value sets

use crate::fragment::{JavaCodeFragment, JavaCodeFragmentBuilder};
use crate::jvm_types::java_literal;
use crate::runtime;
use ipsgen_core::{DatatypeKind, ValueDatatype};
use ipsgen_valueset::{ValueSet, ValueSetContent};

/// `ValueSet<T>` type for an attribute of `datatype`.
pub fn value_set_type(datatype: &ValueDatatype) -> JavaCodeFragment {
    let mut code = JavaCodeFragmentBuilder::new();
    code.append_class_name(runtime::VALUE_SET).append("<");
    append_element_type(&mut code, datatype);
    code.append(">");
    code.build()
}

/// Expression creating a runtime value set equal to `value_set`.
///
/// Derived sets constrain nothing and become unrestricted sets. Range steps
/// are dropped for dates.
pub fn value_set_expression(value_set: &ValueSet, datatype: &ValueDatatype) -> JavaCodeFragment {
    let mut code = JavaCodeFragmentBuilder::new();
    let contains_null = !datatype.is_primitive();
    match value_set.content() {
        ValueSetContent::Unrestricted(set) => {
            new_generic(&mut code, runtime::UNRESTRICTED_VALUE_SET, datatype);
            code.append(&format!("({})", set.contains_null && contains_null));
        }
        ValueSetContent::Derived(_) => {
            new_generic(&mut code, runtime::UNRESTRICTED_VALUE_SET, datatype);
            code.append(&format!("({contains_null})"));
        }
        ValueSetContent::Enum(set) => {
            new_generic(&mut code, runtime::ORDERED_VALUE_SET, datatype);
            code.append(&format!(
                "({}, null",
                set.contains_null_entry() && contains_null
            ));
            for value in set.values().iter().filter_map(|v| v.as_deref()) {
                code.append(", ");
                code.append_fragment(&java_literal(datatype, Some(value)));
            }
            code.append(")");
        }
        ValueSetContent::Range(set) => {
            new_generic(&mut code, runtime::DEFAULT_RANGE, datatype);
            let step = if datatype.kind == DatatypeKind::GregorianDate {
                None
            } else {
                set.step.as_deref()
            };
            code.append("(");
            for bound in [set.lower_bound.as_deref(), set.upper_bound.as_deref(), step] {
                code.append_fragment(&boxed_literal(datatype, bound));
                code.append(", ");
            }
            code.append(&format!("{})", set.contains_null && contains_null));
        }
        ValueSetContent::StringLength(set) => {
            code.append("new ")
                .append_class_name(runtime::STRING_LENGTH_VALUE_SET)
                .append("(");
            match set.maximum() {
                Some(max) => code.append(&max.to_string()),
                None => code.append("null"),
            };
            code.append(&format!(", {})", set.contains_null));
        }
    }
    code.build()
}

fn new_generic(code: &mut JavaCodeFragmentBuilder, class: &str, datatype: &ValueDatatype) {
    code.append("new ").append_class_name(class).append("<");
    append_element_type(code, datatype);
    code.append(">");
}

/// Element types are always reference types.
fn append_element_type(code: &mut JavaCodeFragmentBuilder, datatype: &ValueDatatype) {
    let jvm = crate::jvm_types::map_datatype(datatype);
    code.append_class_name(jvm.java_type(true));
}

/// Literal usable where the boxed type is expected; null stays null even
/// for primitive datatypes.
fn boxed_literal(datatype: &ValueDatatype, value: Option<&str>) -> JavaCodeFragment {
    match value {
        None => JavaCodeFragment::from_source("null"),
        Some(_) => java_literal(datatype, value),
    }
}
