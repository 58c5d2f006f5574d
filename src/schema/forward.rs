use super::{PlaceholderKey, SchemaConfig};
use crate::element::{ElementBody, FormElement};
use serde_json::{Map, Value, json};

/// Generate the JSON Schema describing `elements`.
///
/// The result is `{type: "object", properties, required}` with `required`
/// omitted when no element in the scope is required.
pub fn to_schema(elements: &[FormElement], config: &SchemaConfig) -> Value {
    Value::Object(object_schema(elements, config))
}

fn object_schema(elements: &[FormElement], config: &SchemaConfig) -> Map<String, Value> {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for element in elements {
        properties.insert(element.id.clone(), property_schema(element, config));
        if element.required {
            required.push(Value::String(element.id.clone()));
        }
    }

    let mut schema = Map::new();
    schema.insert("type".into(), json!("object"));
    schema.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".into(), Value::Array(required));
    }
    schema
}

fn property_schema(element: &FormElement, config: &SchemaConfig) -> Value {
    let mut schema = match &element.body {
        ElementBody::Section { children } => {
            let mut nested = object_schema(children, config);
            annotate(&mut nested, element);
            return Value::Object(nested);
        }
        ElementBody::Text { placeholder } => {
            let mut schema = typed("string");
            add_placeholder(&mut schema, placeholder.as_deref(), config);
            schema
        }
        ElementBody::Email { placeholder } => {
            let mut schema = typed("string");
            schema.insert("format".into(), json!("email"));
            add_placeholder(&mut schema, placeholder.as_deref(), config);
            schema
        }
        ElementBody::Number { placeholder } => {
            let mut schema = typed("number");
            add_placeholder(&mut schema, placeholder.as_deref(), config);
            schema
        }
        ElementBody::Checkbox => typed("boolean"),
        ElementBody::Select {
            options,
            is_multiple_choice: true,
            max_options,
        } => {
            let mut schema = typed("array");
            schema.insert("items".into(), json!({ "type": "string", "enum": options }));
            if let Some(max) = max_options {
                schema.insert("maxItems".into(), json!(max));
            }
            schema
        }
        ElementBody::Select { options, .. } => {
            let mut schema = typed("string");
            schema.insert("enum".into(), json!(options));
            schema
        }
        ElementBody::Title => {
            let mut schema = typed("string");
            schema.insert("readOnly".into(), json!(true));
            schema
        }
    };

    annotate(&mut schema, element);
    Value::Object(schema)
}

fn typed(kind: &str) -> Map<String, Value> {
    let mut schema = Map::new();
    schema.insert("type".into(), json!(kind));
    schema
}

// Empty descriptions are left out, same as absent ones
fn annotate(schema: &mut Map<String, Value>, element: &FormElement) {
    schema.insert("title".into(), json!(element.label));
    if let Some(description) = element.description.as_deref().filter(|d| !d.is_empty()) {
        schema.insert("description".into(), json!(description));
    }
}

fn add_placeholder(schema: &mut Map<String, Value>, placeholder: Option<&str>, config: &SchemaConfig) {
    let Some(placeholder) = placeholder.filter(|p| !p.is_empty()) else {
        return;
    };
    if matches!(config.placeholder_key, PlaceholderKey::Examples | PlaceholderKey::Both) {
        schema.insert("examples".into(), json!([placeholder]));
    }
    if matches!(config.placeholder_key, PlaceholderKey::Example | PlaceholderKey::Both) {
        schema.insert("example".into(), json!(placeholder));
    }
}
