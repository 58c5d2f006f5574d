use crate::command::{Command, CommandContext, CommandHistory};
use crate::config::BuilderConfig;
use crate::document::FormTree;
use crate::element::{ElementKind, ElementPatch};
use crate::event::{EventBus, EventHandler, FormEvent};
use crate::id_generator::IdGenerator;
use crate::preview::FormPreview;
use crate::schema::{self, HydratedForm};
use serde_json::Value;

/// The Element Tree Manager: owns the form tree and every change to it.
///
/// All mutation goes through [`FormEditor::execute`] (the convenience methods
/// build a [`Command`] and call it). Each effective change replaces the tree
/// with a new value, records the previous one for undo, and notifies
/// subscribers on the event bus. Commands that resolve to no change are
/// absorbed silently: the tree, history and subscribers are left alone.
///
/// # Example
///
/// ```rust
/// use form_builder::{ElementKind, FormEditor};
///
/// let mut editor = FormEditor::new();
/// editor.insert(ElementKind::Section, None);
/// let section_id = editor.tree().elements()[0].id.clone();
/// editor.insert(ElementKind::Text, Some(&section_id));
///
/// let schema = editor.schema();
/// assert_eq!(schema["properties"][&section_id]["type"], "object");
/// ```
pub struct FormEditor {
    tree: FormTree,
    ids: Box<dyn IdGenerator>,
    history: CommandHistory,
    event_bus: EventBus,
    config: BuilderConfig,
}

impl std::fmt::Debug for FormEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormEditor")
            .field("tree", &self.tree)
            .field("history", &self.history)
            .field("event_bus", &self.event_bus)
            .field("config", &self.config)
            .finish()
    }
}

impl Default for FormEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl FormEditor {
    pub fn new() -> Self {
        Self::with_config(BuilderConfig::default())
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        let ids = config.ids.generator();
        Self::with_id_generator(config, ids)
    }

    /// Use a specific id generator, e.g. a deterministic one in tests
    pub fn with_id_generator(config: BuilderConfig, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            tree: FormTree::new(),
            history: CommandHistory::with_limit(config.history_limit),
            ids,
            event_bus: EventBus::new(),
            config,
        }
    }

    pub fn tree(&self) -> &FormTree {
        &self.tree
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.event_bus.subscribe(handler);
    }

    /// Run a command against the current tree. Returns whether it changed
    /// anything.
    pub fn execute(&mut self, command: Command) -> bool {
        let applied = {
            let mut ctx = CommandContext::new(&self.tree, self.ids.as_mut());
            command.execute(&mut ctx)
        };

        let Some(applied) = applied else {
            log::debug!("{:?} left the tree unchanged", command);
            return false;
        };

        log::info!("applied {:?}", applied.event);
        let before = std::mem::replace(&mut self.tree, applied.tree);
        self.history.record(command, before);
        self.event_bus.emit(applied.event);
        true
    }

    /// Drop a new `kind` element into the section `parent_id`, or the root.
    pub fn insert(&mut self, kind: ElementKind, parent_id: Option<&str>) -> &FormTree {
        self.execute(Command::AddElement {
            tool: kind,
            parent_id: parent_id.map(str::to_string),
        });
        &self.tree
    }

    /// Handle the end of a drag of `element_id` over `over_id`.
    pub fn move_element(&mut self, element_id: &str, over_id: Option<&str>) -> &FormTree {
        self.execute(Command::MoveElement {
            element_id: element_id.to_string(),
            over_id: over_id.map(str::to_string),
        });
        &self.tree
    }

    pub fn update(&mut self, element_id: &str, patch: ElementPatch) -> &FormTree {
        self.execute(Command::UpdateElement {
            element_id: element_id.to_string(),
            patch,
        });
        &self.tree
    }

    pub fn remove(&mut self, element_id: &str) -> &FormTree {
        self.execute(Command::RemoveElement {
            element_id: element_id.to_string(),
        });
        &self.tree
    }

    /// Replace the tree with one rebuilt from `schema`.
    pub fn load_schema(&mut self, schema: Value) -> &FormTree {
        self.execute(Command::LoadSchema { schema });
        &self.tree
    }

    pub fn undo(&mut self) -> bool {
        self.restore(|history, tree| history.undo(tree))
    }

    pub fn redo(&mut self) -> bool {
        self.restore(|history, tree| history.redo(tree))
    }

    fn restore(&mut self, step: impl FnOnce(&mut CommandHistory, &FormTree) -> Option<FormTree>) -> bool {
        match step(&mut self.history, &self.tree) {
            Some(tree) => {
                self.tree = tree;
                self.event_bus.emit(FormEvent::TreeReplaced);
                true
            }
            None => false,
        }
    }

    /// The JSON Schema for the current tree, regenerated on every call
    pub fn schema(&self) -> Value {
        schema::to_schema(self.tree.elements(), &self.config.schema)
    }

    /// Rebuild a tree and lookup tables from `schema` without touching the
    /// editor
    pub fn hydrate(schema: &Value) -> HydratedForm {
        schema::from_schema(schema)
    }

    pub fn preview(&self) -> FormPreview {
        FormPreview::from_tree(&self.tree, &self.config.schema)
    }
}
