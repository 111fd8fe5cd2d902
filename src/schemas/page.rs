//! Page graph schema - pages, fields and their dynamic attributes
//!
//! Pages are immutable configuration, built once and shared for the
//! lifetime of the process.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::answers::{AnswerSet, AnswerValue};

/// A function of the current answers
pub type Derivation<T> = Arc<dyn Fn(&AnswerSet) -> T + Send + Sync>;

/// Validation predicate over a field's current value (absent when unanswered)
pub type ValueCheck = Arc<dyn Fn(Option<&AnswerValue>) -> bool + Send + Sync>;

/// An attribute that is either a literal or derived from the answers
#[derive(Clone)]
pub enum Dynamic<T> {
    Static(T),
    Derived(Derivation<T>),
}

impl<T> Dynamic<T> {
    pub fn derived<F>(f: F) -> Self
    where
        F: Fn(&AnswerSet) -> T + Send + Sync + 'static,
    {
        Dynamic::Derived(Arc::new(f))
    }

    /// The literal value, if this attribute does not depend on answers
    pub fn as_static(&self) -> Option<&T> {
        match self {
            Dynamic::Static(value) => Some(value),
            Dynamic::Derived(_) => None,
        }
    }
}

impl<T: Default> Default for Dynamic<T> {
    fn default() -> Self {
        Dynamic::Static(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Dynamic<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dynamic::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Dynamic::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

impl From<&str> for Dynamic<String> {
    fn from(text: &str) -> Self {
        Dynamic::Static(text.to_string())
    }
}

impl From<String> for Dynamic<String> {
    fn from(text: String) -> Self {
        Dynamic::Static(text)
    }
}

/// Visibility predicate shared by pages and fields
#[derive(Clone, Default)]
pub enum Visibility {
    /// No predicate declared
    #[default]
    Always,
    /// Visible iff `answers[field] == value`
    Equals { field: String, value: AnswerValue },
    Derived(Derivation<bool>),
}

impl Visibility {
    pub fn when(field: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Visibility::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn derived<F>(f: F) -> Self
    where
        F: Fn(&AnswerSet) -> bool + Send + Sync + 'static,
    {
        Visibility::Derived(Arc::new(f))
    }
}

impl std::fmt::Debug for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Always => f.write_str("Always"),
            Visibility::Equals { field, value } => f
                .debug_struct("Equals")
                .field("field", field)
                .field("value", value)
                .finish(),
            Visibility::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

/// Input kind of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Radio,
    Checkbox,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Radio => write!(f, "radio"),
            FieldKind::Checkbox => write!(f, "checkbox"),
        }
    }
}

/// External reference shown next to a page or field. Opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub label: String,
    pub url: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Presentational page metadata, passed through unmodified
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_format_note: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub page_notes: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceLink>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_image: Option<String>,
}

/// A single input on a page
#[derive(Clone)]
pub struct Field {
    /// Unique within its page; the key into the answer set
    pub name: String,
    pub label: Dynamic<String>,
    pub kind: FieldKind,
    pub required: bool,
    pub options: Dynamic<Vec<String>>,
    pub show_when: Visibility,
    pub validation: Option<ValueCheck>,
    /// Changes are mirrored into the provider currently being enrolled
    pub tracked: bool,
    /// Short label used in reports
    pub summary: Option<String>,
    pub placeholder: Option<String>,
    pub helper_notes: Vec<String>,
    pub resources: Vec<ResourceLink>,
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("show_when", &self.show_when)
            .field("validation", &self.validation.as_ref().map(|_| ".."))
            .field("tracked", &self.tracked)
            .finish_non_exhaustive()
    }
}

impl Field {
    fn new(name: impl Into<String>, label: impl Into<Dynamic<String>>, kind: FieldKind) -> Self {
        Field {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            options: Dynamic::default(),
            show_when: Visibility::Always,
            validation: None,
            tracked: false,
            summary: None,
            placeholder: None,
            helper_notes: Vec::new(),
            resources: Vec::new(),
        }
    }

    pub fn text(name: impl Into<String>, label: impl Into<Dynamic<String>>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn radio(
        name: impl Into<String>,
        label: impl Into<Dynamic<String>>,
        options: &[&str],
    ) -> Self {
        let mut field = Self::new(name, label, FieldKind::Radio);
        field.options = Dynamic::Static(options.iter().map(|o| o.to_string()).collect());
        field
    }

    pub fn checkbox(name: impl Into<String>, label: impl Into<Dynamic<String>>) -> Self {
        Self::new(name, label, FieldKind::Checkbox)
    }

    // ===== BUILDER METHODS =====

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn tracked(mut self) -> Self {
        self.tracked = true;
        self
    }

    pub fn with_visibility(mut self, show_when: Visibility) -> Self {
        self.show_when = show_when;
        self
    }

    pub fn with_options(mut self, options: Dynamic<Vec<String>>) -> Self {
        self.options = options;
        self
    }

    pub fn with_validation<F>(mut self, check: F) -> Self
    where
        F: Fn(Option<&AnswerValue>) -> bool + Send + Sync + 'static,
    {
        self.validation = Some(Arc::new(check));
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

/// One step of the walkthrough
#[derive(Debug, Clone)]
pub struct Page {
    /// Unique, stable identifier used by branch points
    pub id: String,
    pub title: String,
    pub description: Dynamic<String>,
    pub fields: Vec<Field>,
    pub show_when: Visibility,
    /// Terminal for forward navigation
    pub is_completion_page: bool,
    pub metadata: PageMetadata,
}

impl Page {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Page {
            id: id.into(),
            title: title.into(),
            description: Dynamic::default(),
            fields: Vec::new(),
            show_when: Visibility::Always,
            is_completion_page: false,
            metadata: PageMetadata::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<Dynamic<String>>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_visibility(mut self, show_when: Visibility) -> Self {
        self.show_when = show_when;
        self
    }

    pub fn completion(mut self) -> Self {
        self.is_completion_page = true;
        self
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Ordered sequence of pages
#[derive(Debug, Clone, Default)]
pub struct PageGraph {
    pages: Vec<Page>,
    tracked: BTreeSet<String>,
}

impl PageGraph {
    pub fn new(pages: Vec<Page>) -> Self {
        let tracked = pages
            .iter()
            .flat_map(|p| p.fields.iter())
            .filter(|f| f.tracked)
            .map(|f| f.name.clone())
            .collect();
        PageGraph { pages, tracked }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Index of the page with the given id
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.id == id)
    }

    /// First field with this name anywhere in the graph
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.pages.iter().find_map(|p| p.field(name))
    }

    pub fn is_tracked(&self, field: &str) -> bool {
        self.tracked.contains(field)
    }

    /// Tracked fields in graph order
    pub fn tracked_fields(&self) -> impl Iterator<Item = &Field> {
        self.pages
            .iter()
            .flat_map(|p| p.fields.iter())
            .filter(|f| f.tracked)
    }
}
