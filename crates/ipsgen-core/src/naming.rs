//! Naming convention utilities for Java code generation.
//!
//! Model element names follow Java conventions already (`premium`,
//! `coverages`), so most conversions only adjust the first letter or build
//! accessor and constant names from them.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `snake_case` | [`to_camel_case`] | `snakeCase` |
//! | `word` | [`capitalize`] | `Word` |
//! | `Word` | [`uncapitalize`] | `word` |
//! | `sumInsured` | [`to_constant_name`] | `SUM_INSURED` |
//! | `home.Policy` | [`simple_name`] | `Policy` |
//! | `home.Policy` | [`package_of`] | `home` |

/// Java reserved words that cannot be used as identifiers.
const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "true", "false", "null",
];

/// Convert snake_case to camelCase.
///
/// # Examples
///
/// ```
/// use ipsgen_core::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("sum_insured"), "sumInsured");
/// assert_eq!(to_camel_case("already"), "already");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Capitalize the first letter of a string.
///
/// ```
/// use ipsgen_core::naming::capitalize;
///
/// assert_eq!(capitalize("premium"), "Premium");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lower-case the first letter of a string.
pub fn uncapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Convert a camelCase name into a Java constant name.
///
/// ```
/// use ipsgen_core::naming::to_constant_name;
///
/// assert_eq!(to_constant_name("sumInsured"), "SUM_INSURED");
/// assert_eq!(to_constant_name("id"), "ID");
/// ```
pub fn to_constant_name(s: &str) -> String {
    let mut result = String::new();
    let mut previous_lower = false;

    for c in s.chars() {
        if c.is_uppercase() && previous_lower {
            result.push('_');
        }
        previous_lower = c.is_lowercase() || c.is_ascii_digit();
        if c == '-' || c == ' ' {
            result.push('_');
        } else {
            result.extend(c.to_uppercase());
        }
    }

    result
}

/// Unqualified part of a dotted name.
pub fn simple_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('.')
        .map_or(qualified_name, |(_, simple)| simple)
}

/// Package part of a dotted name, empty for the default package.
pub fn package_of(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('.')
        .map_or("", |(package, _)| package)
}

/// Whether `s` is usable as a Java identifier.
pub fn is_valid_java_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !JAVA_KEYWORDS.contains(&s)
}

/// Whether `s` is a dotted sequence of valid Java identifiers.
pub fn is_valid_java_package(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_valid_java_identifier)
}

/// Join a package and a simple name, skipping empty packages.
pub fn qualify(package: &str, simple_name: &str) -> String {
    if package.is_empty() {
        simple_name.to_string()
    } else {
        format!("{package}.{simple_name}")
    }
}
