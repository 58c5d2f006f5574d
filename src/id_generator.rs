use crate::element::ElementKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Source of element ids. Only uniqueness matters, not the scheme.
pub trait IdGenerator: Send {
    fn next_id(&mut self, kind: ElementKind) -> String;
}

/// `<type>_<n>` from a per-instance counter. Deterministic, so tests use it.
#[derive(Debug)]
pub struct SequentialIds {
    next: usize,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: usize) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, kind: ElementKind) -> String {
        let n = self.next;
        self.next += 1;
        format!("{}_{}", kind.as_str(), n)
    }
}

/// `<type>_<uuid>` using random v4 uuids
#[derive(Debug, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self, kind: ElementKind) -> String {
        format!("{}_{}", kind.as_str(), Uuid::new_v4().simple())
    }
}

/// Which generator a configured editor uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Sequential,
    Uuid,
}

impl IdStrategy {
    pub fn generator(self) -> Box<dyn IdGenerator> {
        match self {
            IdStrategy::Sequential => Box::new(SequentialIds::new()),
            IdStrategy::Uuid => Box::new(UuidIds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_are_prefixed_and_increasing() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id(ElementKind::Text), "text_1");
        assert_eq!(ids.next_id(ElementKind::Select), "select_2");
    }

    #[test]
    fn test_uuid_ids_differ() {
        let mut ids = UuidIds;
        let a = ids.next_id(ElementKind::Email);
        let b = ids.next_id(ElementKind::Email);
        assert!(a.starts_with("email_"));
        assert_ne!(a, b);
    }
}
