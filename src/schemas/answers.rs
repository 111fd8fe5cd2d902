//! Answer schema - the live values the operator has entered

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single answer value.
///
/// Checkboxes store flags, text and radio fields store strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Text(String),
}

impl AnswerValue {
    /// Whether the value counts as answered when no validation rule is given
    pub fn is_truthy(&self) -> bool {
        match self {
            AnswerValue::Flag(flag) => *flag,
            AnswerValue::Text(text) => !text.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(text) => Some(text),
            AnswerValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AnswerValue::Flag(flag) => Some(*flag),
            AnswerValue::Text(_) => None,
        }
    }
}

impl std::fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerValue::Flag(true) => write!(f, "[x]"),
            AnswerValue::Flag(false) => write!(f, "[ ]"),
            AnswerValue::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(flag: bool) -> Self {
        AnswerValue::Flag(flag)
    }
}

impl From<&str> for AnswerValue {
    fn from(text: &str) -> Self {
        AnswerValue::Text(text.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(text: String) -> Self {
        AnswerValue::Text(text)
    }
}

/// Mapping from field name to value for the segment of the flow currently active.
///
/// Not namespaced per provider: the same set represents the main application
/// or one provider's sub-flow depending on where navigation is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    values: BTreeMap<String, AnswerValue>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&AnswerValue> {
        self.values.get(field)
    }

    /// Text value of a field, if it holds one
    pub fn text(&self, field: &str) -> Option<&str> {
        self.values.get(field).and_then(AnswerValue::as_str)
    }

    /// Whether `field` currently equals `expected`
    pub fn is(&self, field: &str, expected: &AnswerValue) -> bool {
        self.values.get(field) == Some(expected)
    }

    /// Whether `field` holds the text `expected`
    pub fn is_text(&self, field: &str, expected: &str) -> bool {
        self.text(field) == Some(expected)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<AnswerValue>) {
        self.values.insert(field.into(), value.into());
    }

    /// Remove a field entirely. The key is absent afterwards, not falsy.
    pub fn remove(&mut self, field: &str) -> Option<AnswerValue> {
        self.values.remove(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.values.iter()
    }

    /// Return a new AnswerSet with `field` set
    pub fn with(mut self, field: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.set(field, value);
        self
    }
}
