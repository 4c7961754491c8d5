//! XML persistence of value sets
//!
//! ```xml
//! <ValueSet abstract="false" id="vs-1">
//!     <Range containsNull="true" empty="false">
//!         <LowerBound>18</LowerBound>
//!         <UpperBound>99</UpperBound>
//!         <Step isNull="true"/>
//!     </Range>
//! </ValueSet>
//! ```
//!
//! Documents written before abstract value sets existed carry no
//! `abstract` attribute; they read as concrete sets.

use crate::enumeration::EnumValueSet;
use crate::error::{ValueSetError, ValueSetResult};
use crate::kind::ValueSetKind;
use crate::range::RangeValueSet;
use crate::string_length::StringLengthValueSet;
use crate::unrestricted::UnrestrictedValueSet;
use crate::value_set::{ValueSet, ValueSetContent, ValueSetOwnerRef};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use roxmltree::{Document, Node};
use std::io::{Cursor, Write};

/// Element name of a persisted value set
pub const XML_TAG: &str = "ValueSet";

const VALUE_TAG: &str = "Value";
const LOWER_BOUND_TAG: &str = "LowerBound";
const UPPER_BOUND_TAG: &str = "UpperBound";
const STEP_TAG: &str = "Step";

impl ValueSet {
    /// Serialize into a standalone XML fragment.
    pub fn to_xml(&self) -> ValueSetResult<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 4);
        self.write_xml(&mut writer)?;
        let bytes = writer.into_inner().into_inner();
        String::from_utf8(bytes).map_err(|err| ValueSetError::Xml(err.to_string()))
    }

    /// Write the `<ValueSet>` element into an enclosing document.
    pub fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> ValueSetResult<()> {
        let mut root = BytesStart::new(XML_TAG);
        root.push_attribute(("abstract", bool_text(self.is_abstract())));
        if !self.id().is_empty() {
            root.push_attribute(("id", self.id()));
        }
        writer.write_event(Event::Start(root))?;

        let tag = self.kind().xml_tag();
        match self.content() {
            ValueSetContent::Unrestricted(set) => {
                let mut element = BytesStart::new(tag);
                element.push_attribute(("containsNull", bool_text(set.contains_null)));
                writer.write_event(Event::Empty(element))?;
            }
            ValueSetContent::Derived(_) => {
                writer.write_event(Event::Empty(BytesStart::new(tag)))?;
            }
            ValueSetContent::StringLength(set) => {
                let mut element = BytesStart::new(tag);
                element.push_attribute(("containsNull", bool_text(set.contains_null)));
                if let Some(max) = &set.maximum_length {
                    element.push_attribute(("maximumLength", max.as_str()));
                }
                writer.write_event(Event::Empty(element))?;
            }
            ValueSetContent::Enum(set) => {
                let mut element = BytesStart::new(tag);
                element.push_attribute(("containsNull", bool_text(set.contains_null_entry())));
                writer.write_event(Event::Start(element))?;
                for value in set.values() {
                    write_nullable(writer, VALUE_TAG, value.as_deref())?;
                }
                writer.write_event(Event::End(BytesEnd::new(tag)))?;
            }
            ValueSetContent::Range(set) => {
                let mut element = BytesStart::new(tag);
                element.push_attribute(("containsNull", bool_text(set.contains_null)));
                element.push_attribute(("empty", bool_text(set.empty)));
                writer.write_event(Event::Start(element))?;
                write_nullable(writer, LOWER_BOUND_TAG, set.lower_bound.as_deref())?;
                write_nullable(writer, UPPER_BOUND_TAG, set.upper_bound.as_deref())?;
                write_nullable(writer, STEP_TAG, set.step.as_deref())?;
                writer.write_event(Event::End(BytesEnd::new(tag)))?;
            }
        }

        writer.write_event(Event::End(BytesEnd::new(XML_TAG)))?;
        Ok(())
    }

    /// Parse a standalone `<ValueSet>` document.
    ///
    /// `id` is used when the element carries no `id` attribute.
    pub fn from_xml(xml: &str, owner: ValueSetOwnerRef, id: &str) -> ValueSetResult<ValueSet> {
        let document = Document::parse(xml)?;
        Self::from_xml_node(document.root_element(), owner, id)
    }

    /// Read a `<ValueSet>` element of an enclosing document.
    pub fn from_xml_node(
        node: Node<'_, '_>,
        owner: ValueSetOwnerRef,
        id: &str,
    ) -> ValueSetResult<ValueSet> {
        if node.tag_name().name() != XML_TAG {
            return Err(ValueSetError::InvalidDocument(format!(
                "expected <{XML_TAG}>, found <{}>",
                node.tag_name().name()
            )));
        }
        let id = node.attribute("id").unwrap_or(id);
        let is_abstract = node.attribute("abstract").is_some_and(|v| v == "true");

        let Some(element) = node.children().find(Node::is_element) else {
            return Err(ValueSetError::InvalidDocument(
                "value set element has no kind element".to_string(),
            ));
        };
        let tag = element.tag_name().name();
        let kind = ValueSetKind::from_xml_tag(tag).ok_or_else(|| {
            ValueSetError::InvalidDocument(format!("unknown value set kind <{tag}>"))
        })?;

        let contains_null = element.attribute("containsNull").is_none_or(|v| v == "true");
        let content = match kind {
            ValueSetKind::Unrestricted => {
                ValueSetContent::Unrestricted(UnrestrictedValueSet::new(contains_null))
            }
            ValueSetKind::Derived => ValueSetContent::default_for(ValueSetKind::Derived),
            ValueSetKind::StringLength => ValueSetContent::StringLength(StringLengthValueSet {
                maximum_length: element.attribute("maximumLength").map(str::to_string),
                contains_null,
            }),
            ValueSetKind::Enum => {
                let values = element
                    .children()
                    .filter(|n| n.has_tag_name(VALUE_TAG))
                    .map(read_nullable);
                ValueSetContent::Enum(EnumValueSet::new(values))
            }
            ValueSetKind::Range => ValueSetContent::Range(RangeValueSet {
                lower_bound: child_value(element, LOWER_BOUND_TAG),
                upper_bound: child_value(element, UPPER_BOUND_TAG),
                step: child_value(element, STEP_TAG),
                contains_null,
                empty: element.attribute("empty").is_some_and(|v| v == "true"),
            }),
        };

        let mut value_set = ValueSet::new(owner, id, content);
        if is_abstract {
            value_set.set_abstract(true)?;
        }
        value_set.take_changes();
        Ok(value_set)
    }
}

fn bool_text(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn write_nullable<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<&str>,
) -> ValueSetResult<()> {
    match value {
        Some(value) => {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            writer.write_event(Event::Text(BytesText::new(value)))?;
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        None => {
            let mut element = BytesStart::new(tag);
            element.push_attribute(("isNull", "true"));
            writer.write_event(Event::Empty(element))?;
        }
    }
    Ok(())
}

fn read_nullable(node: Node<'_, '_>) -> Option<String> {
    if node.attribute("isNull") == Some("true") {
        return None;
    }
    Some(node.text().unwrap_or_default().to_string())
}

fn child_value(parent: Node<'_, '_>, tag: &str) -> Option<String> {
    parent
        .children()
        .find(|n| n.has_tag_name(tag))
        .and_then(read_nullable)
}
