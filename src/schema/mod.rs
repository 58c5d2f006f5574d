//! Conversion between the element tree and JSON Schema.
//!
//! Both directions are pure functions of their input (and, for the forward
//! direction, the [`SchemaConfig`]).

mod forward;
mod reverse;

pub use forward::to_schema;
pub use reverse::{HydratedForm, from_schema};

use serde::{Deserialize, Serialize};

/// Which keyword carries an input's placeholder text in generated schemas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderKey {
    /// `examples: [placeholder]`
    #[default]
    Examples,
    /// `example: placeholder`
    Example,
    /// Both of the above
    Both,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub placeholder_key: PlaceholderKey,
}

impl SchemaConfig {
    pub fn with_placeholder_key(placeholder_key: PlaceholderKey) -> Self {
        Self { placeholder_key }
    }
}
