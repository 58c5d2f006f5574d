use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod common;
mod options;

pub use common::{DEFAULT_MAX_OPTIONS, MIN_SELECT_OPTIONS, default_label, default_options};
pub use options::{add_option, change_option, parse_max_options, remove_option};

/// The closed set of element types a form can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Email,
    Number,
    Select,
    Checkbox,
    Section,
    Title,
}

impl ElementKind {
    pub const ALL: [ElementKind; 7] = [
        ElementKind::Text,
        ElementKind::Email,
        ElementKind::Number,
        ElementKind::Select,
        ElementKind::Checkbox,
        ElementKind::Section,
        ElementKind::Title,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Email => "email",
            ElementKind::Number => "number",
            ElementKind::Select => "select",
            ElementKind::Checkbox => "checkbox",
            ElementKind::Section => "section",
            ElementKind::Title => "title",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name an element type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown element type: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for ElementKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Type-specific payload of a form element.
///
/// Only `Section` owns children and only `Select` owns options, so those
/// invariants hold by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementBody {
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Email {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Select {
        #[serde(default)]
        options: Vec<String>,
        #[serde(rename = "isMultipleChoice", default)]
        is_multiple_choice: bool,
        #[serde(rename = "maxOptions", default, skip_serializing_if = "Option::is_none")]
        max_options: Option<usize>,
    },
    Checkbox,
    Section {
        #[serde(default)]
        children: Vec<FormElement>,
    },
    Title,
}

impl ElementBody {
    /// Seeded payload for a freshly dropped tool
    pub fn new(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Text => ElementBody::Text { placeholder: None },
            ElementKind::Email => ElementBody::Email { placeholder: None },
            ElementKind::Number => ElementBody::Number { placeholder: None },
            ElementKind::Select => ElementBody::Select {
                options: default_options(),
                is_multiple_choice: false,
                max_options: Some(DEFAULT_MAX_OPTIONS),
            },
            ElementKind::Checkbox => ElementBody::Checkbox,
            ElementKind::Section => ElementBody::Section { children: Vec::new() },
            ElementKind::Title => ElementBody::Title,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            ElementBody::Text { .. } => ElementKind::Text,
            ElementBody::Email { .. } => ElementKind::Email,
            ElementBody::Number { .. } => ElementKind::Number,
            ElementBody::Select { .. } => ElementKind::Select,
            ElementBody::Checkbox => ElementKind::Checkbox,
            ElementBody::Section { .. } => ElementKind::Section,
            ElementBody::Title => ElementKind::Title,
        }
    }
}

/// One node of the form tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormElement {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub body: ElementBody,
}

impl FormElement {
    /// Create an element of `kind` with the defaults a dropped tool gets.
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        let description = match kind {
            ElementKind::Title | ElementKind::Section => Some(String::new()),
            _ => None,
        };
        Self {
            id: id.into(),
            label: default_label(kind),
            description,
            required: false,
            body: ElementBody::new(kind),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.body.kind()
    }

    pub fn is_section(&self) -> bool {
        matches!(self.body, ElementBody::Section { .. })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Replace the children of a section; ignored for every other kind.
    pub fn with_children(mut self, new_children: Vec<FormElement>) -> Self {
        if let ElementBody::Section { children } = &mut self.body {
            *children = new_children;
        }
        self
    }

    pub fn children(&self) -> Option<&[FormElement]> {
        match &self.body {
            ElementBody::Section { children } => Some(children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<FormElement>> {
        match &mut self.body {
            ElementBody::Section { children } => Some(children),
            _ => None,
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match &self.body {
            ElementBody::Text { placeholder }
            | ElementBody::Email { placeholder }
            | ElementBody::Number { placeholder } => placeholder.as_deref(),
            _ => None,
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match &self.body {
            ElementBody::Select { options, .. } => Some(options),
            _ => None,
        }
    }

    /// Merge `patch` into this element. Fields that do not apply to the
    /// element's kind are ignored.
    pub fn apply_patch(&mut self, patch: &ElementPatch) {
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(required) = patch.required {
            self.required = required;
        }

        match &mut self.body {
            ElementBody::Text { placeholder }
            | ElementBody::Email { placeholder }
            | ElementBody::Number { placeholder } => {
                if let Some(value) = &patch.placeholder {
                    *placeholder = Some(value.clone());
                }
            }
            ElementBody::Select {
                options,
                is_multiple_choice,
                max_options,
            } => {
                if let Some(value) = &patch.options {
                    *options = value.clone();
                }
                if let Some(value) = patch.is_multiple_choice {
                    *is_multiple_choice = value;
                }
                if let Some(value) = patch.max_options {
                    *max_options = Some(value);
                }
            }
            ElementBody::Checkbox | ElementBody::Section { .. } | ElementBody::Title => {}
        }
    }
}

/// A partial set of element fields, merged by an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_multiple_choice: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_options: Option<usize>,
}

impl ElementPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn options(options: Vec<String>) -> Self {
        Self {
            options: Some(options),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Factory functions for building elements by hand
pub mod factory {
    use super::*;

    pub fn text(id: &str, label: &str) -> FormElement {
        FormElement::new(id, ElementKind::Text).with_label(label)
    }

    pub fn email(id: &str, label: &str) -> FormElement {
        FormElement::new(id, ElementKind::Email).with_label(label)
    }

    pub fn number(id: &str, label: &str) -> FormElement {
        FormElement::new(id, ElementKind::Number).with_label(label)
    }

    pub fn checkbox(id: &str, label: &str) -> FormElement {
        FormElement::new(id, ElementKind::Checkbox).with_label(label)
    }

    pub fn title(id: &str, label: &str) -> FormElement {
        FormElement::new(id, ElementKind::Title).with_label(label)
    }

    pub fn select(id: &str, label: &str, options: &[&str], multiple: bool) -> FormElement {
        let mut element = FormElement::new(id, ElementKind::Select).with_label(label);
        element.body = ElementBody::Select {
            options: options.iter().map(|o| o.to_string()).collect(),
            is_multiple_choice: multiple,
            max_options: Some(DEFAULT_MAX_OPTIONS),
        };
        element
    }

    pub fn section(id: &str, label: &str, children: Vec<FormElement>) -> FormElement {
        FormElement::new(id, ElementKind::Section)
            .with_label(label)
            .with_children(children)
    }
}
