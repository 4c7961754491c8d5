//! Severity-tagged validation messages
//!
//! Validation never throws. Every check appends [`Message`]s to a
//! [`MessageList`] and the caller decides what to do with the aggregate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message severity, ordered from least to most severe
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Reference to the object (and optionally the property) a message is about
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectProperty {
    /// Identifier of the offending object, e.g. a qualified type name or
    /// `Type.attribute`.
    pub object: String,

    /// Name of the offending property, if the message is property specific.
    #[serde(default)]
    pub property: Option<String>,
}

impl ObjectProperty {
    pub fn new(object: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            property: Some(property.into()),
        }
    }

    pub fn object(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            property: None,
        }
    }
}

impl fmt::Display for ObjectProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.property {
            Some(property) => write!(f, "{}#{}", self.object, property),
            None => write!(f, "{}", self.object),
        }
    }
}

/// A single validation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub code: String,
    pub text: String,
    pub severity: Severity,
    #[serde(default)]
    pub invalid_properties: Vec<ObjectProperty>,
}

impl Message {
    pub fn new(severity: Severity, code: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            text: text.into(),
            severity,
            invalid_properties: Vec::new(),
        }
    }

    pub fn error(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, text)
    }

    pub fn warning(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, text)
    }

    pub fn info(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Severity::Info, code, text)
    }

    /// Attach the object/property the message refers to.
    #[must_use]
    pub fn with_property(mut self, object: impl Into<String>, property: impl Into<String>) -> Self {
        self.invalid_properties
            .push(ObjectProperty::new(object, property));
        self
    }

    /// Attach an object reference without a property.
    #[must_use]
    pub fn with_object(mut self, object: impl Into<String>) -> Self {
        self.invalid_properties.push(ObjectProperty::object(object));
        self
    }

    /// Whether this message refers to the given object (and property, if given).
    pub fn refers_to(&self, object: &str, property: Option<&str>) -> bool {
        self.invalid_properties.iter().any(|p| {
            p.object == object && property.is_none_or(|prop| p.property.as_deref() == Some(prop))
        })
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.code, self.text)?;
        if let Some(first) = self.invalid_properties.first() {
            write!(f, " ({first})")?;
        }
        Ok(())
    }
}

/// Ordered, append-only collection of messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageList {
    messages: Vec<Message>,
}

impl MessageList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Append all messages of `other`, keeping their order.
    pub fn extend(&mut self, other: MessageList) {
        self.messages.extend(other.messages);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// The highest severity in the list, `None` when empty.
    pub fn severity(&self) -> Option<Severity> {
        self.messages.iter().map(|m| m.severity).max()
    }

    pub fn contains_errors(&self) -> bool {
        self.severity() == Some(Severity::Error)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity == severity)
            .count()
    }

    pub fn message_by_code(&self, code: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.code == code)
    }

    /// All messages that refer to the given object and property.
    pub fn messages_for(&self, object: &str, property: Option<&str>) -> MessageList {
        MessageList {
            messages: self
                .messages
                .iter()
                .filter(|m| m.refers_to(object, property))
                .cloned()
                .collect(),
        }
    }
}

impl From<Message> for MessageList {
    fn from(message: Message) -> Self {
        Self {
            messages: vec![message],
        }
    }
}

impl FromIterator<Message> for MessageList {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MessageList {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl<'a> IntoIterator for &'a MessageList {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl fmt::Display for MessageList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for message in &self.messages {
            writeln!(f, "{message}")?;
        }
        Ok(())
    }
}
