use crate::element::{ElementPatch, FormElement};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The sequence that holds an element: the root list or a section's children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Container {
    Root,
    Section(String),
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Root => f.write_str("<root>"),
            Container::Section(id) => f.write_str(id),
        }
    }
}

/// Where an element lives in the tree
#[derive(Debug, Clone, PartialEq)]
pub struct Location<'a> {
    pub element: &'a FormElement,
    pub parent: Container,
    pub index: usize,
}

/// What a drag from one element onto another resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveKind {
    /// Detach from `from` and append to the section `to`
    Reparent { from: Container, to: String },
    /// Reposition within one sequence
    Reorder {
        parent: Container,
        from: usize,
        to: usize,
    },
    NoOp,
}

/// The ordered, arbitrarily nested sequence of form elements.
///
/// Every mutating operation takes `&self` and returns a new tree, leaving the
/// original untouched, so callers can detect changes with `==`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormTree {
    elements: Vec<FormElement>,
}

impl From<Vec<FormElement>> for FormTree {
    fn from(elements: Vec<FormElement>) -> Self {
        Self { elements }
    }
}

impl FormTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[FormElement] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<FormElement> {
        self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Depth-first search for the first element with `id`.
    pub fn find(&self, id: &str) -> Option<&FormElement> {
        find_in(&self.elements, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Depth-first search returning the element and its containing sequence.
    pub fn locate(&self, id: &str) -> Option<Location<'_>> {
        locate_in(&self.elements, id, &Container::Root)
    }

    /// All elements in depth-first pre-order
    pub fn flatten(&self) -> Vec<&FormElement> {
        let mut out = Vec::new();
        flatten_into(&self.elements, &mut out);
        out
    }

    /// Ids of the sections enclosing `id`, outermost first.
    pub fn section_path(&self, id: &str) -> Option<Vec<String>> {
        let mut path = Vec::new();
        path_in(&self.elements, id, &mut path).then_some(path)
    }

    /// Append `element` to the section `parent_id`, or to the root when the
    /// parent is absent, unknown or not a section.
    pub fn with_inserted(&self, element: FormElement, parent_id: Option<&str>) -> FormTree {
        if self.contains(&element.id) {
            log::warn!("insert rejected: id {} already in tree", element.id);
            return self.clone();
        }

        let mut next = self.clone();
        let target = match parent_id {
            Some(id) => find_mut(&mut next.elements, id).and_then(FormElement::children_mut),
            None => None,
        };
        match target {
            Some(children) => children.push(element),
            None => next.elements.push(element),
        }
        next
    }

    /// Decide what dragging `active_id` onto `over_id` does.
    pub fn classify_move(&self, active_id: &str, over_id: Option<&str>) -> MoveKind {
        let Some(over_id) = over_id else {
            return MoveKind::NoOp;
        };
        if active_id == over_id {
            return MoveKind::NoOp;
        }
        let (Some(active), Some(over)) = (self.locate(active_id), self.locate(over_id)) else {
            return MoveKind::NoOp;
        };

        let over_container = Container::Section(over_id.to_string());
        if over.element.is_section() && active.parent != over_container {
            // A section cannot be dropped into its own subtree
            let inside_self = active
                .element
                .children()
                .is_some_and(|children| find_in(children, over_id).is_some());
            if inside_self {
                return MoveKind::NoOp;
            }
            return MoveKind::Reparent {
                from: active.parent,
                to: over_id.to_string(),
            };
        }

        if over.parent == active.parent && over.index != active.index {
            return MoveKind::Reorder {
                parent: active.parent,
                from: active.index,
                to: over.index,
            };
        }

        MoveKind::NoOp
    }

    /// Move an existing element per [`FormTree::classify_move`].
    pub fn with_moved(&self, active_id: &str, over_id: Option<&str>) -> FormTree {
        match self.classify_move(active_id, over_id) {
            MoveKind::Reparent { to, .. } => {
                let mut next = self.clone();
                let Some(moved) = remove_in(&mut next.elements, active_id) else {
                    return self.clone();
                };
                match find_mut(&mut next.elements, &to).and_then(FormElement::children_mut) {
                    Some(children) => {
                        children.push(moved);
                        next
                    }
                    None => self.clone(),
                }
            }
            MoveKind::Reorder { parent, from, to } => {
                let mut next = self.clone();
                if let Some(sequence) = container_mut(&mut next.elements, &parent) {
                    let moved = sequence.remove(from);
                    sequence.insert(to, moved);
                }
                next
            }
            MoveKind::NoOp => {
                log::debug!("move {} -> {:?} is a no-op", active_id, over_id);
                self.clone()
            }
        }
    }

    /// Merge `patch` into the element `id`, wherever it is.
    pub fn with_updated(&self, id: &str, patch: &ElementPatch) -> FormTree {
        let mut next = self.clone();
        match find_mut(&mut next.elements, id) {
            Some(element) => element.apply_patch(patch),
            None => log::debug!("update: no element {}", id),
        }
        next
    }

    /// Delete the element `id` together with its subtree.
    pub fn with_removed(&self, id: &str) -> FormTree {
        let mut next = self.clone();
        if remove_in(&mut next.elements, id).is_none() {
            log::debug!("remove: no element {}", id);
        }
        next
    }
}

fn find_in<'a>(elements: &'a [FormElement], id: &str) -> Option<&'a FormElement> {
    for element in elements {
        if element.id == id {
            return Some(element);
        }
        if let Some(found) = element.children().and_then(|children| find_in(children, id)) {
            return Some(found);
        }
    }
    None
}

fn find_mut<'a>(elements: &'a mut [FormElement], id: &str) -> Option<&'a mut FormElement> {
    for element in elements.iter_mut() {
        if element.id == id {
            return Some(element);
        }
        if let Some(children) = element.children_mut() {
            if let Some(found) = find_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn locate_in<'a>(
    elements: &'a [FormElement],
    id: &str,
    parent: &Container,
) -> Option<Location<'a>> {
    for (index, element) in elements.iter().enumerate() {
        if element.id == id {
            return Some(Location {
                element,
                parent: parent.clone(),
                index,
            });
        }
        if let Some(children) = element.children() {
            let container = Container::Section(element.id.clone());
            if let Some(found) = locate_in(children, id, &container) {
                return Some(found);
            }
        }
    }
    None
}

fn container_mut<'a>(
    elements: &'a mut Vec<FormElement>,
    container: &Container,
) -> Option<&'a mut Vec<FormElement>> {
    match container {
        Container::Root => Some(elements),
        Container::Section(id) => find_mut(elements, id).and_then(FormElement::children_mut),
    }
}

fn remove_in(elements: &mut Vec<FormElement>, id: &str) -> Option<FormElement> {
    for index in 0..elements.len() {
        if elements[index].id == id {
            return Some(elements.remove(index));
        }
        if let Some(children) = elements[index].children_mut() {
            if let Some(removed) = remove_in(children, id) {
                return Some(removed);
            }
        }
    }
    None
}

fn flatten_into<'a>(elements: &'a [FormElement], out: &mut Vec<&'a FormElement>) {
    for element in elements {
        out.push(element);
        if let Some(children) = element.children() {
            flatten_into(children, out);
        }
    }
}

fn path_in(elements: &[FormElement], id: &str, path: &mut Vec<String>) -> bool {
    for element in elements {
        if element.id == id {
            return true;
        }
        if let Some(children) = element.children() {
            path.push(element.id.clone());
            if path_in(children, id, path) {
                return true;
            }
            path.pop();
        }
    }
    false
}
