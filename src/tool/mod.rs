use crate::element::ElementKind;
use serde::Serialize;

/// A palette entry the user drags onto the canvas. Not part of the tree
/// until dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tool {
    pub kind: ElementKind,
    pub name: &'static str,
}

impl Tool {
    pub const fn new(kind: ElementKind, name: &'static str) -> Self {
        Self { kind, name }
    }

    /// Handle the drag collaborator reports while a tool card is dragged
    pub fn drag_id(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Resolve a drag handle back to a tool, if it names one
    pub fn from_drag_id(drag_id: &str) -> Option<Tool> {
        PALETTE.iter().copied().find(|tool| tool.drag_id() == drag_id)
    }
}

pub const PALETTE: [Tool; 7] = [
    Tool::new(ElementKind::Title, "Title"),
    Tool::new(ElementKind::Text, "Text Input"),
    Tool::new(ElementKind::Email, "Email Input"),
    Tool::new(ElementKind::Number, "Number Input"),
    Tool::new(ElementKind::Select, "Select"),
    Tool::new(ElementKind::Checkbox, "Checkbox"),
    Tool::new(ElementKind::Section, "Section"),
];
