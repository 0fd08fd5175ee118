use crate::refs::{BlockRef, Links, SeqNo};
use crate::store::versions::VersionIndex;
use std::collections::BTreeSet;

/// Tracks the two structural defects a DAG can carry while blocks are still in
/// flight: `holes` (known-absent ancestors) and `inconsistencies` (referenced
/// parents whose hash disagrees with everything stored at that height).
#[derive(Clone, Debug, Default)]
pub struct GapTracker {
    holes: BTreeSet<SeqNo>,
    inconsistencies: BTreeSet<BlockRef>,
}

impl GapTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holes(&self) -> &BTreeSet<SeqNo> {
        &self.holes
    }

    pub fn inconsistencies(&self) -> &BTreeSet<BlockRef> {
        &self.inconsistencies
    }

    /// Called immediately after `versions.record(seq, hash)` for the ingested block,
    /// with `parents` its (validated) parent links. Implements spec §4.C's two rules.
    pub fn on_block_recorded(&mut self, seq: SeqNo, hash_owner: BlockRef, parents: &Links, versions: &VersionIndex) {
        debug_assert_eq!(hash_owner.seq, seq);

        // Rule 1: hole maintenance. The walk never reaches seq 0: that height is the
        // synthetic genesis, not a real gap, and is never recorded in `versions`.
        self.holes.remove(&seq);
        for parent in parents {
            let mut walk = parent.seq;
            while walk >= 1 && !versions.contains(walk) {
                self.holes.insert(walk);
                walk -= 1;
            }
        }

        // Rule 2: inconsistency maintenance.
        for parent in parents {
            if versions.contains(parent.seq) && !versions.has_hash(parent.seq, &parent.hash) {
                self.inconsistencies.insert(*parent);
            }
        }
        self.inconsistencies.remove(&hash_owner);
    }
}
