use crate::document::FormTree;
use crate::element::{ElementBody, ElementKind, FormElement};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Preferred id of the title element synthesised from a schema's own title
pub const SCHEMA_TITLE_ID: &str = "form_title";

/// A tree rebuilt from a schema, plus the lookup tables a preview needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HydratedForm {
    pub tree: FormTree,
    /// Element id to human-readable label
    pub labels: BTreeMap<String, String>,
    /// Element id to description, only for properties that declare one
    pub descriptions: BTreeMap<String, String>,
    /// Initial values from `default` keywords, nested like the schema
    pub defaults: Map<String, Value>,
    /// Property key for every element whose id had to differ from its key
    pub keys: BTreeMap<String, String>,
}

impl HydratedForm {
    /// Schema property key behind the element `id`
    pub fn property_key<'a>(&'a self, id: &'a str) -> &'a str {
        self.keys.get(id).map(String::as_str).unwrap_or(id)
    }
}

/// Ids handed out so far during one hydration
#[derive(Default)]
struct IdClaims {
    used: BTreeSet<String>,
}

impl IdClaims {
    /// Claim `key` as an id, or a free variant of it: first prefixed with the
    /// parent section id, then with a numeric suffix.
    fn claim(&mut self, key: &str, parent: Option<&str>) -> String {
        let base = match parent {
            Some(parent) if self.used.contains(key) => format!("{parent}_{key}"),
            _ => key.to_string(),
        };
        let mut id = base.clone();
        let mut n = 2;
        while self.used.contains(&id) {
            id = format!("{base}_{n}");
            n += 1;
        }

        if id != key {
            log::warn!("schema property {} reuses an id, hydrated as {}", key, id);
        }
        self.used.insert(id.clone());
        id
    }

    fn release(&mut self, id: &str) {
        self.used.remove(id);
    }
}

/// Rebuild an element tree from a JSON Schema object.
///
/// Properties whose shape has no element counterpart are dropped.
/// Element ids are unique across the tree: a property key already taken
/// elsewhere gets a disambiguated id, recorded in [`HydratedForm::keys`].
pub fn from_schema(schema: &Value) -> HydratedForm {
    let mut form = HydratedForm::default();
    let mut ids = IdClaims::default();
    let mut elements = Vec::new();

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        let required = required_set(schema);
        elements = hydrate_properties(properties, &required, &mut form, &mut ids, None, None);
    }

    let title = schema.get("title").and_then(Value::as_str);
    let description = schema.get("description").and_then(Value::as_str);
    if title.is_some() || description.is_some() {
        let id = ids.claim(SCHEMA_TITLE_ID, None);
        let mut heading = FormElement::new(id, ElementKind::Title).with_label(title.unwrap_or_default());
        heading.description = description.map(str::to_string);
        elements.insert(0, heading);
    }

    form.tree = FormTree::from(elements);
    form
}

fn hydrate_properties(
    properties: &Map<String, Value>,
    required: &[&str],
    form: &mut HydratedForm,
    ids: &mut IdClaims,
    parent: Option<&str>,
    defaults_scope: Option<&mut Map<String, Value>>,
) -> Vec<FormElement> {
    let mut local_defaults = Map::new();
    let mut elements = Vec::new();

    for (key, property) in properties {
        let id = ids.claim(key, parent);
        let label = property
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or(key)
            .to_string();
        let description = property
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);

        let Some(body) = hydrate_body(key, &id, property, form, ids, &mut local_defaults) else {
            log::warn!("schema property {} has no element counterpart, dropped", key);
            ids.release(&id);
            continue;
        };

        if let Some(default) = property.get("default") {
            merge_default(&mut local_defaults, key, default.clone());
        }

        if &id != key {
            form.keys.insert(id.clone(), key.clone());
        }
        form.labels.insert(id.clone(), label.clone());
        if let Some(description) = &description {
            form.descriptions.insert(id.clone(), description.clone());
        }

        elements.push(FormElement {
            id,
            label,
            description,
            required: required.contains(&key.as_str()),
            body,
        });
    }

    match defaults_scope {
        Some(scope) => scope.extend(local_defaults),
        None => form.defaults.extend(local_defaults),
    }
    elements
}

fn hydrate_body(
    key: &str,
    id: &str,
    property: &Value,
    form: &mut HydratedForm,
    ids: &mut IdClaims,
    defaults: &mut Map<String, Value>,
) -> Option<ElementBody> {
    let body = match property.get("type").and_then(Value::as_str) {
        Some("string") => {
            if let Some(options) = string_enum(property.get("enum")) {
                ElementBody::Select {
                    options,
                    is_multiple_choice: false,
                    max_options: None,
                }
            } else if property.get("format").and_then(Value::as_str) == Some("email") {
                ElementBody::Email {
                    placeholder: placeholder(property),
                }
            } else if property.get("readOnly").and_then(Value::as_bool) == Some(true) {
                ElementBody::Title
            } else {
                ElementBody::Text {
                    placeholder: placeholder(property),
                }
            }
        }
        Some("number") | Some("integer") => ElementBody::Number {
            placeholder: placeholder(property),
        },
        Some("boolean") => ElementBody::Checkbox,
        Some("array") => {
            let options = string_enum(property.get("items").and_then(|items| items.get("enum")))?;
            let max_options = property
                .get("maxItems")
                .and_then(Value::as_u64)
                .and_then(|max| usize::try_from(max).ok());
            ElementBody::Select {
                options,
                is_multiple_choice: true,
                max_options,
            }
        }
        Some("object") => {
            let mut nested_defaults = Map::new();
            let children = match property.get("properties").and_then(Value::as_object) {
                Some(properties) => {
                    let required = required_set(property);
                    hydrate_properties(
                        properties,
                        &required,
                        form,
                        ids,
                        Some(id),
                        Some(&mut nested_defaults),
                    )
                }
                None => Vec::new(),
            };
            if !nested_defaults.is_empty() {
                defaults.insert(key.to_string(), Value::Object(nested_defaults));
            }
            ElementBody::Section { children }
        }
        _ => return None,
    };
    Some(body)
}

/// A section's own object `default` wins per key over its children's
/// `default`s, which fill in the keys it leaves out.
fn merge_default(defaults: &mut Map<String, Value>, key: &str, default: Value) {
    match (defaults.get_mut(key), default) {
        (Some(Value::Object(children)), Value::Object(own)) => {
            children.extend(own);
        }
        (_, default) => {
            defaults.insert(key.to_string(), default);
        }
    }
}

fn required_set(schema: &Value) -> Vec<&str> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|ids| ids.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

fn string_enum(values: Option<&Value>) -> Option<Vec<String>> {
    let values = values?.as_array()?;
    Some(
        values
            .iter()
            .map(|value| match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}

// Accepts the singular `example` as well as the first entry of `examples`
fn placeholder(property: &Value) -> Option<String> {
    property
        .get("example")
        .and_then(Value::as_str)
        .or_else(|| {
            property
                .get("examples")
                .and_then(Value::as_array)
                .and_then(|examples| examples.iter().find_map(Value::as_str))
        })
        .map(str::to_string)
}
