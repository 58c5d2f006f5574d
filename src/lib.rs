#![warn(clippy::all, rust_2018_idioms)]

pub mod command;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod id_generator;
pub mod preview;
pub mod schema;
pub mod state;
pub mod tool;

pub use command::{Command, CommandHistory};
pub use config::BuilderConfig;
pub use document::{Container, FormTree};
pub use element::{ElementBody, ElementKind, ElementPatch, FormElement};
pub use error::{ConfigError, FieldError, PreviewError, ValidationFailure};
pub use event::{EventBus, EventHandler, EventLog, FormEvent};
pub use id_generator::{IdGenerator, IdStrategy, SequentialIds, UuidIds};
pub use preview::{FormPreview, Submission};
pub use schema::{HydratedForm, PlaceholderKey, SchemaConfig, from_schema, to_schema};
pub use state::FormEditor;
pub use tool::Tool;
