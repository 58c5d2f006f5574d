use crate::document::FormTree;
use crate::element::{ElementKind, FormElement};
use crate::error::{FieldError, PreviewError, PreviewResult, ValidationFailure};
use crate::schema::{self, SchemaConfig};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A form being filled in: the schema it must satisfy, the tree it was built
/// from, and the values entered so far.
///
/// Values are kept nested the way the schema nests them, so a field inside a
/// section lives under that section's id.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPreview {
    schema: Value,
    tree: FormTree,
    labels: BTreeMap<String, String>,
    descriptions: BTreeMap<String, String>,
    /// Element id to property key, where the two differ
    keys: BTreeMap<String, String>,
    values: Map<String, Value>,
}

/// One submitted value with its display text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmittedField {
    pub id: String,
    pub label: String,
    pub description: Option<String>,
    pub value: Value,
}

/// Accepted values, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub data: Value,
    pub fields: Vec<SubmittedField>,
}

impl FormPreview {
    pub fn from_tree(tree: &FormTree, config: &SchemaConfig) -> Self {
        let mut labels = BTreeMap::new();
        let mut descriptions = BTreeMap::new();
        for element in tree.flatten() {
            labels.insert(element.id.clone(), element.label.clone());
            if let Some(description) = element.description.as_deref().filter(|d| !d.is_empty()) {
                descriptions.insert(element.id.clone(), description.to_string());
            }
        }

        Self {
            schema: schema::to_schema(tree.elements(), config),
            tree: tree.clone(),
            labels,
            descriptions,
            keys: BTreeMap::new(),
            values: Map::new(),
        }
    }

    /// Preview an externally supplied schema; `default`s seed the values.
    pub fn from_schema(schema: Value) -> Self {
        let hydrated = schema::from_schema(&schema);
        Self {
            schema,
            tree: hydrated.tree,
            labels: hydrated.labels,
            descriptions: hydrated.descriptions,
            keys: hydrated.keys,
            values: hydrated.defaults,
        }
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn tree(&self) -> &FormTree {
        &self.tree
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Label for `id`, falling back to the id itself
    pub fn label<'a>(&'a self, id: &'a str) -> &'a str {
        self.labels.get(id).map(String::as_str).unwrap_or(id)
    }

    pub fn description(&self, id: &str) -> Option<&str> {
        self.descriptions.get(id).map(String::as_str)
    }

    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    pub fn descriptions(&self) -> &BTreeMap<String, String> {
        &self.descriptions
    }

    /// Set the value of the input `id`. Unknown ids, titles and sections
    /// are ignored.
    pub fn set_value(&mut self, id: &str, value: Value) -> bool {
        if !self.collects_input(id) {
            log::debug!("set_value: {} does not take input", id);
            return false;
        }
        let Some((path, key)) = self.value_path(id) else {
            return false;
        };

        let mut scope = &mut self.values;
        for section in path {
            let entry = scope.entry(section).or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            let Value::Object(nested) = entry else {
                return false;
            };
            scope = nested;
        }
        scope.insert(key, value);
        true
    }

    pub fn value(&self, id: &str) -> Option<&Value> {
        let (path, key) = self.value_path(id)?;
        let mut scope = &self.values;
        for section in &path {
            scope = scope.get(section)?.as_object()?;
        }
        scope.get(&key)
    }

    pub fn clear_value(&mut self, id: &str) {
        let Some((path, key)) = self.value_path(id) else {
            return;
        };
        let mut scope = &mut self.values;
        for section in &path {
            match scope.get_mut(section) {
                Some(Value::Object(nested)) => scope = nested,
                _ => return,
            }
        }
        scope.remove(&key);
    }

    /// Check the entered values against the schema.
    pub fn validate(&self) -> PreviewResult<()> {
        let validator = jsonschema::validator_for(&self.schema)
            .map_err(|err| PreviewError::InvalidSchema(err.to_string()))?;

        let instance = Value::Object(self.values.clone());
        let errors: Vec<FieldError> = validator
            .iter_errors(&instance)
            .map(|error| FieldError {
                pointer: error.instance_path.to_string(),
                message: error.to_string(),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            log::debug!("submission rejected with {} errors", errors.len());
            Err(ValidationFailure { errors }.into())
        }
    }

    /// Validate and, on success, pair every entered value with its label.
    pub fn submit(&self) -> PreviewResult<Submission> {
        self.validate()?;

        let fields = self
            .tree
            .flatten()
            .into_iter()
            .filter(|element| takes_input(element))
            .filter_map(|element| {
                let value = self.value(&element.id)?.clone();
                Some(SubmittedField {
                    id: element.id.clone(),
                    label: self.label(&element.id).to_string(),
                    description: self.description(&element.id).map(str::to_string),
                    value,
                })
            })
            .collect();

        Ok(Submission {
            data: Value::Object(self.values.clone()),
            fields,
        })
    }

    // Section keys leading to `id`, and the key `id` is stored under
    fn value_path(&self, id: &str) -> Option<(Vec<String>, String)> {
        let path = self
            .tree
            .section_path(id)?
            .into_iter()
            .map(|section| self.property_key(&section).to_string())
            .collect();
        Some((path, self.property_key(id).to_string()))
    }

    fn property_key<'a>(&'a self, id: &'a str) -> &'a str {
        self.keys.get(id).map(String::as_str).unwrap_or(id)
    }

    fn collects_input(&self, id: &str) -> bool {
        self.tree.find(id).is_some_and(takes_input)
    }
}

fn takes_input(element: &FormElement) -> bool {
    !matches!(element.kind(), ElementKind::Title | ElementKind::Section)
}
