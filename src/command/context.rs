use crate::document::FormTree;
use crate::id_generator::IdGenerator;

/// What a command needs to compute its result
pub struct CommandContext<'a> {
    /// The tree the command applies to
    pub tree: &'a FormTree,
    /// Source of ids for inserted elements
    pub ids: &'a mut dyn IdGenerator,
}

impl<'a> CommandContext<'a> {
    pub fn new(tree: &'a FormTree, ids: &'a mut dyn IdGenerator) -> Self {
        Self { tree, ids }
    }
}
