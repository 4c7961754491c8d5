//! Java source fragments with their imports
//!
//! Generators never produce bare strings. They return a [`JavaCodeFragment`]
//! which carries the import declarations its source needs, so fragments can
//! be concatenated in any order and the compilation unit collects a sorted,
//! duplicate-free import list at the end.

use std::collections::BTreeSet;
use std::fmt;

const INDENT: &str = "    ";

/// Java source text plus the qualified names it references
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JavaCodeFragment {
    source: String,
    imports: BTreeSet<String>,
}

impl JavaCodeFragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fragment without imports.
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            imports: BTreeSet::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn imports(&self) -> &BTreeSet<String> {
        &self.imports
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn add_import(&mut self, qualified_name: impl Into<String>) {
        let qualified_name = qualified_name.into();
        let raw = qualified_name
            .split_once('<')
            .map_or(qualified_name.as_str(), |(raw, _)| raw);
        if needs_import(raw) {
            self.imports.insert(raw.to_string());
        }
    }

    /// Append another fragment's source and imports.
    pub fn append(&mut self, other: &JavaCodeFragment) {
        self.source.push_str(&other.source);
        self.imports.extend(other.imports.iter().cloned());
    }

    pub fn into_parts(self) -> (String, BTreeSet<String>) {
        (self.source, self.imports)
    }
}

impl fmt::Display for JavaCodeFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Concatenate fragments in order.
pub fn concat<'a>(fragments: impl IntoIterator<Item = &'a JavaCodeFragment>) -> JavaCodeFragment {
    let mut result = JavaCodeFragment::new();
    for fragment in fragments {
        result.append(fragment);
    }
    result
}

/// Incremental construction of a [`JavaCodeFragment`] with indentation
#[derive(Debug, Default)]
pub struct JavaCodeFragmentBuilder {
    fragment: JavaCodeFragment,
    indent: usize,
    at_line_start: bool,
}

impl JavaCodeFragmentBuilder {
    pub fn new() -> Self {
        Self {
            fragment: JavaCodeFragment::new(),
            indent: 0,
            at_line_start: true,
        }
    }

    pub fn append(&mut self, text: &str) -> &mut Self {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.newline();
            }
            if line.is_empty() {
                continue;
            }
            if self.at_line_start {
                for _ in 0..self.indent {
                    self.fragment.source.push_str(INDENT);
                }
                self.at_line_start = false;
            }
            self.fragment.source.push_str(line);
        }
        self
    }

    pub fn append_ln(&mut self, text: &str) -> &mut Self {
        self.append(text);
        self.newline();
        self
    }

    pub fn newline(&mut self) -> &mut Self {
        self.fragment.source.push('\n');
        self.at_line_start = true;
        self
    }

    /// Append the simple name of a class and import it.
    pub fn append_class_name(&mut self, qualified_name: &str) -> &mut Self {
        self.fragment.add_import(qualified_name);
        self.append(simple_class_name(qualified_name))
    }

    /// `@Name` or `@Name(params)`, without a line break.
    pub fn annotation(&mut self, qualified_name: &str, params: Option<&str>) -> &mut Self {
        self.append("@");
        self.append_class_name(qualified_name);
        if let Some(params) = params {
            self.append("(");
            self.append(params);
            self.append(")");
        }
        self
    }

    /// Annotation followed by a line break.
    pub fn annotation_ln(&mut self, qualified_name: &str, params: Option<&str>) -> &mut Self {
        self.annotation(qualified_name, params);
        self.newline()
    }

    /// Java string literal.
    pub fn append_quoted(&mut self, value: &str) -> &mut Self {
        let quoted = quote(value);
        self.append(&quoted)
    }

    /// Java array initializer of string literals: `{"a", "b"}`.
    pub fn append_quoted_strings<S: AsRef<str>>(&mut self, values: &[S]) -> &mut Self {
        let quoted = quoted_string_array(values);
        self.append(&quoted)
    }

    /// Append another fragment at the current indentation.
    pub fn append_fragment(&mut self, fragment: &JavaCodeFragment) -> &mut Self {
        self.fragment
            .imports
            .extend(fragment.imports.iter().cloned());
        self.append(&fragment.source)
    }

    pub fn add_import(&mut self, qualified_name: &str) -> &mut Self {
        self.fragment.add_import(qualified_name);
        self
    }

    pub fn indent(&mut self) -> &mut Self {
        self.indent += 1;
        self
    }

    pub fn outdent(&mut self) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fragment.is_empty()
    }

    pub fn build(self) -> JavaCodeFragment {
        self.fragment
    }
}

/// Java string literal for `value`.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}

/// `{"a", "b"}` for the given values.
pub fn quoted_string_array<S: AsRef<str>>(values: &[S]) -> String {
    let items: Vec<String> = values.iter().map(|v| quote(v.as_ref())).collect();
    format!("{{{}}}", items.join(", "))
}

/// Simple name of a class reference; generic arguments are kept.
fn simple_class_name(qualified_name: &str) -> &str {
    let raw = qualified_name
        .split_once('<')
        .map_or(qualified_name, |(raw, _)| raw);
    match raw.rfind('.') {
        Some(pos) => &qualified_name[pos + 1..],
        None => qualified_name,
    }
}

/// Primitives, unqualified names and `java.lang` classes need no import.
fn needs_import(raw: &str) -> bool {
    match raw.rsplit_once('.') {
        None => false,
        Some((package, _)) => package != "java.lang",
    }
}
