use crate::refs::{BlockRef, Links};
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// The forward adjacency graph: for every block, the set of blocks that name it
/// as a parent.
///
/// Grounded on the teacher's `MemoryRelationsStore` (`consensus/src/model/stores/relations.rs`),
/// which keeps a `parents_map`/`children_map` pair behind its own lock; here the map is
/// unguarded because `ChainView` already serializes all access through one mutex, and we
/// only ever need the forward (child) direction -- parents are read straight off the
/// ingested block, never looked up later.
#[derive(Clone, Debug, Default)]
pub struct ForwardAdjacency {
    children: BTreeMap<BlockRef, BTreeSet<BlockRef>>,
}

impl ForwardAdjacency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a forward edge from every parent in `parents` to `child`. Idempotent.
    pub fn link_child(&mut self, parents: &Links, child: BlockRef) {
        for parent in parents {
            self.children.entry(*parent).or_default().insert(child);
        }
    }

    /// The set of blocks that directly name `parent` as a parent, if any are known.
    pub fn children_of(&self, parent: &BlockRef) -> Option<&BTreeSet<BlockRef>> {
        self.children.get(parent)
    }

    /// Whether `r` has at least one known forward edge (i.e. is not a terminal candidate).
    pub fn has_children(&self, r: &BlockRef) -> bool {
        self.children.get(r).is_some_and(|c| !c.is_empty())
    }
}
