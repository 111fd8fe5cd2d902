//! Page graph file schema - the JSON form of a page graph
//!
//! Answer-dependent attributes are expressed with [`Condition`]s and
//! compiled into [`Dynamic`]/[`Visibility`] closures on load.

use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, WalkthroughError};

use super::answers::AnswerValue;
use super::condition::Condition;
use super::page::{
    Dynamic, Field, FieldKind, Page, PageGraph, PageMetadata, ResourceLink, ValueCheck,
    Visibility,
};

/// Literal text, or text chosen by a condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextSpec {
    Literal(String),
    Conditional {
        when: Condition,
        then: String,
        otherwise: String,
    },
}

impl Default for TextSpec {
    fn default() -> Self {
        TextSpec::Literal(String::new())
    }
}

/// Literal option list, or options chosen by a condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionsSpec {
    Literal(Vec<String>),
    Conditional {
        when: Condition,
        then: Vec<String>,
        otherwise: Vec<String>,
    },
}

/// Validation rule for a field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum Rule {
    /// Checkbox must be ticked
    Checked,
    /// Text must be one of the listed values
    OneOf { values: Vec<String> },
    /// Text must have at least `min` characters
    MinLength { min: usize },
    /// Text must contain something other than whitespace
    NonBlank,
    /// Text must match the regular expression
    Pattern { pattern: String },
}

/// A field as written in a graph file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: String,

    pub label: TextSpec,

    #[serde(rename = "type")]
    pub kind: FieldKind,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionsSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_when: Option<Condition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Rule>,

    #[serde(default)]
    pub tracked: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub helper_notes: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceLink>,
}

/// A page as written in a graph file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpec {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: TextSpec,

    #[serde(default)]
    pub fields: Vec<FieldSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_when: Option<Condition>,

    #[serde(default)]
    pub is_completion_page: bool,

    #[serde(flatten)]
    pub metadata: PageMetadata,
}

/// Top-level graph file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphFile {
    pub pages: Vec<PageSpec>,
}

fn text_attribute(spec: TextSpec) -> Dynamic<String> {
    match spec {
        TextSpec::Literal(text) => Dynamic::Static(text),
        TextSpec::Conditional {
            when,
            then,
            otherwise,
        } => Dynamic::derived(move |answers| {
            if when.evaluate(answers) {
                then.clone()
            } else {
                otherwise.clone()
            }
        }),
    }
}

fn options_attribute(spec: Option<OptionsSpec>) -> Dynamic<Vec<String>> {
    match spec {
        None => Dynamic::Static(Vec::new()),
        Some(OptionsSpec::Literal(options)) => Dynamic::Static(options),
        Some(OptionsSpec::Conditional {
            when,
            then,
            otherwise,
        }) => Dynamic::derived(move |answers| {
            if when.evaluate(answers) {
                then.clone()
            } else {
                otherwise.clone()
            }
        }),
    }
}

fn visibility(condition: Option<Condition>) -> Visibility {
    match condition {
        None => Visibility::Always,
        Some(Condition::Equals { field, value }) => Visibility::Equals { field, value },
        Some(other) => Visibility::derived(move |answers| other.evaluate(answers)),
    }
}

impl Rule {
    /// Compile the rule into a value check.
    ///
    /// # Errors
    /// * `ConfigError` - If a `pattern` rule holds an invalid regular expression
    pub fn compile(&self) -> Result<ValueCheck> {
        let check: ValueCheck = match self {
            Rule::Checked => {
                Arc::new(|value: Option<&AnswerValue>| value == Some(&AnswerValue::Flag(true)))
            }
            Rule::OneOf { values } => {
                let values = values.clone();
                Arc::new(move |value: Option<&AnswerValue>| {
                    value
                        .and_then(AnswerValue::as_str)
                        .is_some_and(|text| values.iter().any(|v| v == text))
                })
            }
            Rule::MinLength { min } => {
                let min = *min;
                Arc::new(move |value: Option<&AnswerValue>| {
                    value
                        .and_then(AnswerValue::as_str)
                        .is_some_and(|text| text.chars().count() >= min)
                })
            }
            Rule::NonBlank => Arc::new(|value: Option<&AnswerValue>| {
                value
                    .and_then(AnswerValue::as_str)
                    .is_some_and(|text| !text.trim().is_empty())
            }),
            Rule::Pattern { pattern } => {
                let regex = Regex::new(pattern).map_err(|e| {
                    WalkthroughError::ConfigError(format!("invalid pattern '{}': {}", pattern, e))
                })?;
                Arc::new(move |value: Option<&AnswerValue>| {
                    value
                        .and_then(AnswerValue::as_str)
                        .is_some_and(|text| regex.is_match(text))
                })
            }
        };
        Ok(check)
    }
}

impl FieldSpec {
    fn into_field(self) -> Result<Field> {
        let validation = match &self.validation {
            Some(rule) => Some(rule.compile().map_err(|e| {
                WalkthroughError::wrap(e, format!("field '{}'", self.name))
            })?),
            None => None,
        };

        Ok(Field {
            name: self.name,
            label: text_attribute(self.label),
            kind: self.kind,
            required: self.required,
            options: options_attribute(self.options),
            show_when: visibility(self.show_when),
            validation,
            tracked: self.tracked,
            summary: self.summary,
            placeholder: self.placeholder,
            helper_notes: self.helper_notes,
            resources: self.resources,
        })
    }
}

impl PageSpec {
    fn into_page(self) -> Result<Page> {
        let fields = self
            .fields
            .into_iter()
            .map(FieldSpec::into_field)
            .collect::<Result<Vec<_>>>()
            .map_err(|e| WalkthroughError::wrap(e, format!("page '{}'", self.id)))?;

        Ok(Page {
            id: self.id,
            title: self.title,
            description: text_attribute(self.description),
            fields,
            show_when: visibility(self.show_when),
            is_completion_page: self.is_completion_page,
            metadata: self.metadata,
        })
    }
}

impl GraphFile {
    /// Field names referenced by page and field conditions, with the id of
    /// the page they appear on
    pub fn condition_references(&self) -> Vec<(&str, &str)> {
        let mut refs = Vec::new();
        for page in &self.pages {
            let page_conditions = page.show_when.iter();
            let field_conditions = page.fields.iter().filter_map(|f| f.show_when.as_ref());
            for condition in page_conditions.chain(field_conditions) {
                for field in condition.fields() {
                    refs.push((page.id.as_str(), field));
                }
            }
        }
        refs
    }

    /// Compile the file into a runtime page graph
    pub fn into_graph(self) -> Result<PageGraph> {
        let pages = self
            .pages
            .into_iter()
            .map(PageSpec::into_page)
            .collect::<Result<Vec<_>>>()?;
        Ok(PageGraph::new(pages))
    }
}
