use form_builder::element::{ElementBody, factory};
use form_builder::{
    ElementKind, ElementPatch, FormTree, PlaceholderKey, SchemaConfig, from_schema, to_schema,
};
use serde_json::{Value, json};

fn with_placeholder(tree: FormTree, id: &str, placeholder: &str) -> FormTree {
    tree.with_updated(
        id,
        &ElementPatch {
            placeholder: Some(placeholder.to_string()),
            ..ElementPatch::default()
        },
    )
}

#[test]
fn test_forward_nested_section_scenario() {
    let tree = FormTree::from(vec![
        factory::text("a", "Name").with_required(true),
        factory::section("s", "Address", vec![factory::text("s_line1", "Line 1")]),
    ]);

    let schema = to_schema(tree.elements(), &SchemaConfig::default());
    assert_eq!(
        schema,
        json!({
            "type": "object",
            "properties": {
                "a": { "type": "string", "title": "Name" },
                "s": {
                    "type": "object",
                    "title": "Address",
                    "properties": {
                        "s_line1": { "type": "string", "title": "Line 1" }
                    }
                }
            },
            "required": ["a"]
        })
    );
}

#[test]
fn test_forward_is_deterministic() {
    let tree = FormTree::from(vec![
        factory::title("t", "Survey").with_description("Tell us"),
        factory::select("c", "Color", &["Red", "Blue"], true),
        factory::section("s", "More", vec![factory::number("n", "Age").with_required(true)]),
    ]);
    let config = SchemaConfig::default();
    assert_eq!(to_schema(tree.elements(), &config), to_schema(tree.elements(), &config));
}

#[test]
fn test_forward_empty_tree() {
    let schema = to_schema(&[], &SchemaConfig::default());
    assert_eq!(schema, json!({ "type": "object", "properties": {} }));
    assert!(schema.get("required").is_none());
}

#[test]
fn test_forward_field_types() {
    let tree = FormTree::from(vec![
        factory::email("e", "Email"),
        factory::number("n", "Age"),
        factory::checkbox("c", "Agree").with_description("Terms"),
        factory::title("t", "Heading").with_description("Intro"),
        factory::select("one", "Pick", &["A", "B"], false),
    ]);
    let schema = to_schema(tree.elements(), &SchemaConfig::default());
    let properties = &schema["properties"];

    assert_eq!(properties["e"], json!({ "type": "string", "format": "email", "title": "Email" }));
    assert_eq!(properties["n"], json!({ "type": "number", "title": "Age" }));
    assert_eq!(
        properties["c"],
        json!({ "type": "boolean", "title": "Agree", "description": "Terms" })
    );
    assert_eq!(
        properties["t"],
        json!({ "type": "string", "readOnly": true, "title": "Heading", "description": "Intro" })
    );
    assert_eq!(
        properties["one"],
        json!({ "type": "string", "enum": ["A", "B"], "title": "Pick" })
    );
}

#[test]
fn test_forward_multiple_choice_select() {
    let tree = FormTree::from(vec![factory::select("m", "Many", &["A", "B"], true)]).with_updated(
        "m",
        &ElementPatch {
            max_options: Some(2),
            ..ElementPatch::default()
        },
    );
    let schema = to_schema(tree.elements(), &SchemaConfig::default());
    assert_eq!(
        schema["properties"]["m"],
        json!({
            "type": "array",
            "items": { "type": "string", "enum": ["A", "B"] },
            "maxItems": 2,
            "title": "Many"
        })
    );
}

#[test]
fn test_forward_required_tracks_immediate_scope() {
    let tree = FormTree::from(vec![
        factory::section(
            "s",
            "Group",
            vec![
                factory::text("inner", "Inner").with_required(true),
                factory::section("deep", "Deep", vec![factory::checkbox("d", "D").with_required(true)]),
            ],
        )
        .with_required(true),
        factory::text("outer", "Outer"),
    ]);
    let schema = to_schema(tree.elements(), &SchemaConfig::default());

    assert_eq!(schema["required"], json!(["s"]));
    assert_eq!(schema["properties"]["s"]["required"], json!(["inner"]));
    assert_eq!(schema["properties"]["s"]["properties"]["deep"]["required"], json!(["d"]));
    assert!(schema["properties"]["s"]["properties"]["deep"]["properties"]["d"]
        .get("required")
        .is_none());
}

#[test]
fn test_forward_placeholder_keys() {
    let tree = with_placeholder(FormTree::from(vec![factory::text("a", "Name")]), "a", "Jane");

    let examples = to_schema(tree.elements(), &SchemaConfig::default());
    assert_eq!(examples["properties"]["a"]["examples"], json!(["Jane"]));
    assert!(examples["properties"]["a"].get("example").is_none());

    let example = to_schema(
        tree.elements(),
        &SchemaConfig::with_placeholder_key(PlaceholderKey::Example),
    );
    assert_eq!(example["properties"]["a"]["example"], json!("Jane"));
    assert!(example["properties"]["a"].get("examples").is_none());

    let both = to_schema(tree.elements(), &SchemaConfig::with_placeholder_key(PlaceholderKey::Both));
    assert_eq!(both["properties"]["a"]["examples"], json!(["Jane"]));
    assert_eq!(both["properties"]["a"]["example"], json!("Jane"));

    // an empty placeholder is not an example
    let blank = with_placeholder(tree, "a", "");
    let schema = to_schema(blank.elements(), &SchemaConfig::default());
    assert!(schema["properties"]["a"].get("examples").is_none());
}

#[test]
fn test_reverse_survey_scenario() {
    let form = from_schema(&json!({
        "type": "object",
        "title": "Survey",
        "properties": {
            "color": { "type": "string", "enum": ["Red", "Blue"] }
        }
    }));

    let elements = form.tree.elements();
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].kind(), ElementKind::Title);
    assert_eq!(elements[0].label, "Survey");

    assert_eq!(elements[1].id, "color");
    assert_eq!(
        elements[1].body,
        ElementBody::Select {
            options: vec!["Red".into(), "Blue".into()],
            is_multiple_choice: false,
            max_options: None,
        }
    );
    assert_eq!(form.labels["color"], "color");
    assert!(form.descriptions.is_empty());
}

#[test]
fn test_reverse_dispatch_by_type() {
    let form = from_schema(&json!({
        "type": "object",
        "required": ["mail", "age"],
        "properties": {
            "mail": { "type": "string", "format": "email", "title": "Email" },
            "name": { "type": "string", "title": "Name", "example": "Jane" },
            "nick": { "type": "string", "examples": ["JJ"] },
            "age": { "type": "integer", "description": "In years" },
            "score": { "type": "number" },
            "agree": { "type": "boolean", "default": true },
            "tags": { "type": "array", "items": { "type": "string", "enum": ["x", "y"] }, "maxItems": 2 },
            "free": { "type": "array", "items": { "type": "string" } },
            "blob": { "type": "null" }
        }
    }));

    let tree = &form.tree;
    let kinds: Vec<(&str, ElementKind)> = tree
        .elements()
        .iter()
        .map(|e| (e.id.as_str(), e.kind()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("mail", ElementKind::Email),
            ("name", ElementKind::Text),
            ("nick", ElementKind::Text),
            ("age", ElementKind::Number),
            ("score", ElementKind::Number),
            ("agree", ElementKind::Checkbox),
            ("tags", ElementKind::Select),
        ]
    );

    assert!(tree.find("mail").unwrap().required);
    assert!(tree.find("age").unwrap().required);
    assert!(!tree.find("name").unwrap().required);
    assert_eq!(tree.find("name").unwrap().placeholder(), Some("Jane"));
    assert_eq!(tree.find("nick").unwrap().placeholder(), Some("JJ"));
    assert_eq!(
        tree.find("tags").unwrap().body,
        ElementBody::Select {
            options: vec!["x".into(), "y".into()],
            is_multiple_choice: true,
            max_options: Some(2),
        }
    );

    assert_eq!(form.labels["mail"], "Email");
    assert_eq!(form.labels["score"], "score");
    assert!(!form.labels.contains_key("free"));
    assert_eq!(form.descriptions.len(), 1);
    assert_eq!(form.descriptions["age"], "In years");
    assert_eq!(form.defaults.get("agree"), Some(&json!(true)));
}

#[test]
fn test_reverse_nested_objects() {
    let form = from_schema(&json!({
        "type": "object",
        "description": "Where we ship",
        "properties": {
            "address": {
                "type": "object",
                "title": "Address",
                "required": ["city"],
                "properties": {
                    "city": { "type": "string", "default": "Oslo" },
                    "geo": {
                        "type": "object",
                        "properties": { "lat": { "type": "number" } }
                    }
                }
            }
        }
    }));

    let elements = form.tree.elements();
    assert_eq!(elements[0].kind(), ElementKind::Title);
    assert_eq!(elements[0].label, "");
    assert_eq!(elements[0].description.as_deref(), Some("Where we ship"));

    let address = form.tree.find("address").unwrap();
    assert!(address.is_section());
    assert!(form.tree.find("city").unwrap().required);
    let geo = form.tree.find("geo").unwrap();
    assert_eq!(geo.children().unwrap()[0].id, "lat");
    assert_eq!(form.tree.section_path("lat"), Some(vec!["address".into(), "geo".into()]));

    assert_eq!(form.labels["address"], "Address");
    assert_eq!(form.labels["lat"], "lat");
    assert_eq!(form.defaults, json!({ "address": { "city": "Oslo" } }).as_object().unwrap().clone());
}

#[test]
fn test_schema_tree_schema_is_stable() {
    let schema = json!({
        "type": "object",
        "properties": {
            "head": { "type": "string", "readOnly": true, "title": "Intro", "description": "Read me" },
            "name": { "type": "string", "title": "Name", "examples": ["Jane"] },
            "mail": { "type": "string", "format": "email", "title": "Mail" },
            "age": { "type": "number", "title": "Age", "description": "Years" },
            "ok": { "type": "boolean", "title": "OK" },
            "one": { "type": "string", "enum": ["A", "B"], "title": "One" },
            "many": {
                "type": "array",
                "items": { "type": "string", "enum": ["A", "B", "C"] },
                "maxItems": 3,
                "title": "Many"
            },
            "box": {
                "type": "object",
                "title": "Box",
                "properties": { "inner": { "type": "string", "title": "Inner" } },
                "required": ["inner"]
            }
        },
        "required": ["name", "box"]
    });

    let tree = from_schema(&schema).tree;
    assert_eq!(to_schema(tree.elements(), &SchemaConfig::default()), schema);
}

#[test]
fn test_placeholder_survives_either_key() {
    let tree = with_placeholder(FormTree::from(vec![factory::text("a", "Name")]), "a", "Jane");
    for key in [PlaceholderKey::Examples, PlaceholderKey::Example, PlaceholderKey::Both] {
        let schema = to_schema(tree.elements(), &SchemaConfig::with_placeholder_key(key));
        let back = from_schema(&schema).tree;
        assert_eq!(back.find("a").unwrap().placeholder(), Some("Jane"), "{key:?}");
    }
}

#[test]
fn test_tree_schema_tree_is_lossy_for_single_select_cap() {
    // maxOptions only reaches the schema for multiple choice selects
    let tree = FormTree::from(vec![factory::select("c", "Color", &["Red", "Blue"], false)]);
    let schema = to_schema(tree.elements(), &SchemaConfig::default());
    let back = from_schema(&schema).tree;

    match &back.find("c").unwrap().body {
        ElementBody::Select { max_options, options, .. } => {
            assert_eq!(*max_options, None);
            assert_eq!(options, &vec!["Red".to_string(), "Blue".to_string()]);
        }
        other => panic!("expected select, got {other:?}"),
    }
}

#[test]
fn test_reverse_ignores_non_object_input() {
    let form = from_schema(&Value::Null);
    assert!(form.tree.is_empty());
    assert!(form.labels.is_empty());
}

#[test]
fn test_reverse_nested_key_reuse_gets_distinct_id() {
    let form = from_schema(&json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "title": "Your name" },
            "billing": {
                "type": "object",
                "properties": {
                    "name": { "type": "string", "title": "Card holder" }
                }
            }
        }
    }));

    let ids: Vec<_> = form.tree.flatten().iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec!["name", "billing", "billing_name"]);
    assert_eq!(form.labels["name"], "Your name");
    assert_eq!(form.labels["billing_name"], "Card holder");
    assert_eq!(form.property_key("billing_name"), "name");
    assert_eq!(form.property_key("name"), "name");
    assert_eq!(form.keys.len(), 1);
}

#[test]
fn test_reverse_heading_does_not_take_a_property_id() {
    let form = from_schema(&json!({
        "type": "object",
        "title": "Survey",
        "properties": {
            "form_title": { "type": "string", "title": "Working title" }
        }
    }));

    let elements: Vec<_> = form
        .tree
        .elements()
        .iter()
        .map(|e| (e.id.as_str(), e.kind()))
        .collect();
    assert_eq!(
        elements,
        vec![("form_title_2", ElementKind::Title), ("form_title", ElementKind::Text)]
    );
    assert_eq!(form.tree.elements()[0].label, "Survey");
    assert_eq!(form.labels["form_title"], "Working title");
    assert!(form.keys.is_empty());
}

#[test]
fn test_reverse_section_default_merges_with_child_defaults() {
    let form = from_schema(&json!({
        "type": "object",
        "properties": {
            "address": {
                "type": "object",
                "default": { "city": "Bergen", "zip": "5003" },
                "properties": {
                    "city": { "type": "string", "default": "Oslo" },
                    "street": { "type": "string", "default": "Main" }
                }
            }
        }
    }));

    assert_eq!(
        Value::Object(form.defaults),
        json!({ "address": { "city": "Bergen", "street": "Main", "zip": "5003" } })
    );
}
