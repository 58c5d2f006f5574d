use crate::document::Container;
use crate::element::ElementKind;

/// Notifications sent to the rendering collaborator after the tree changes.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    ElementAdded {
        id: String,
        kind: ElementKind,
        parent: Container,
    },
    ElementMoved {
        id: String,
        parent: Container,
        from: usize,
        to: usize,
    },
    ElementReparented {
        id: String,
        from: Container,
        to: String,
    },
    ElementUpdated {
        id: String,
    },
    ElementRemoved {
        id: String,
    },
    /// The whole tree was swapped: schema load, undo or redo
    TreeReplaced,
}
