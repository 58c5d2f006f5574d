use super::{Applied, CommandContext, CommandResult};
use crate::document::{Container, FormTree, MoveKind};
use crate::element::{ElementKind, ElementPatch, FormElement};
use crate::event::FormEvent;
use crate::schema;
use crate::tool::Tool;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discrete events reported by the drag/edit collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Command {
    /// A tool card was dropped on the canvas or into a section
    #[serde(rename_all = "camelCase")]
    AddElement {
        tool: ElementKind,
        #[serde(default)]
        parent_id: Option<String>,
    },

    /// A drag ended with `element_id` over `over_id`
    #[serde(rename_all = "camelCase")]
    MoveElement {
        element_id: String,
        #[serde(default)]
        over_id: Option<String>,
    },

    /// A property control changed
    #[serde(rename_all = "camelCase")]
    UpdateElement {
        element_id: String,
        patch: ElementPatch,
    },

    #[serde(rename_all = "camelCase")]
    RemoveElement { element_id: String },

    /// Replace the tree with one rebuilt from a schema
    LoadSchema { schema: Value },
}

// Gives up on a generator that keeps colliding and falls back to a uuid
const MAX_ID_ATTEMPTS: usize = 64;

impl Command {
    /// Compute the tree this command produces. `None` means the command is
    /// a no-op against the current tree.
    pub fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        match self {
            Command::AddElement { tool, parent_id } => {
                Some(add_element(ctx, *tool, parent_id.as_deref()))
            }

            Command::MoveElement { element_id, over_id } => {
                if !ctx.tree.contains(element_id) {
                    // A tool card, not a placed element, is being dropped
                    let tool = Tool::from_drag_id(element_id)?;
                    let target = over_id
                        .as_deref()
                        .filter(|id| ctx.tree.find(id).is_some_and(FormElement::is_section));
                    return Some(add_element(ctx, tool.kind, target));
                }

                let kind = ctx.tree.classify_move(element_id, over_id.as_deref());
                let event = match kind {
                    MoveKind::Reparent { from, to } => FormEvent::ElementReparented {
                        id: element_id.clone(),
                        from,
                        to,
                    },
                    MoveKind::Reorder { parent, from, to } => FormEvent::ElementMoved {
                        id: element_id.clone(),
                        parent,
                        from,
                        to,
                    },
                    MoveKind::NoOp => return None,
                };
                let tree = ctx.tree.with_moved(element_id, over_id.as_deref());
                changed(ctx, tree, event)
            }

            Command::UpdateElement { element_id, patch } => {
                let tree = ctx.tree.with_updated(element_id, patch);
                changed(ctx, tree, FormEvent::ElementUpdated { id: element_id.clone() })
            }

            Command::RemoveElement { element_id } => {
                let tree = ctx.tree.with_removed(element_id);
                changed(ctx, tree, FormEvent::ElementRemoved { id: element_id.clone() })
            }

            Command::LoadSchema { schema } => {
                let tree = schema::from_schema(schema).tree;
                changed(ctx, tree, FormEvent::TreeReplaced)
            }
        }
    }
}

fn changed(ctx: &CommandContext<'_>, tree: FormTree, event: FormEvent) -> CommandResult {
    if &tree == ctx.tree {
        return None;
    }
    Some(Applied { tree, event })
}

fn add_element(ctx: &mut CommandContext<'_>, kind: ElementKind, parent_id: Option<&str>) -> Applied {
    let id = unique_id(ctx, kind);
    let parent = match parent_id {
        Some(parent) if ctx.tree.find(parent).is_some_and(FormElement::is_section) => {
            Container::Section(parent.to_string())
        }
        _ => Container::Root,
    };
    let tree = ctx.tree.with_inserted(FormElement::new(id.clone(), kind), parent_id);
    Applied {
        tree,
        event: FormEvent::ElementAdded { id, kind, parent },
    }
}

fn unique_id(ctx: &mut CommandContext<'_>, kind: ElementKind) -> String {
    for _ in 0..MAX_ID_ATTEMPTS {
        let id = ctx.ids.next_id(kind);
        if !ctx.tree.contains(&id) {
            return id;
        }
        log::debug!("generated id {} already in use, retrying", id);
    }
    format!("{}_{}", kind.as_str(), uuid::Uuid::new_v4().simple())
}
