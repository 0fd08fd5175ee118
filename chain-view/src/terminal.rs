use crate::error::{ChainError, ChainResult};
use crate::refs::{BlockRef, Links};
use crate::store::forward::ForwardAdjacency;
use lru::LruCache;
use std::collections::BTreeSet;
use std::num::NonZeroUsize;

/// Default capacity of the descendant-tip closure memo, per spec: bounds the
/// amortised cost of ingest on arbitrarily deep DAGs.
pub const DEFAULT_CACHE_CAPACITY: usize = 100_000;

/// Incrementally derives the current tip set via a cached traversal of forward
/// adjacency.
///
/// The cache invalidation rule is the one subtle piece of this whole crate: a
/// cached entry goes stale the moment a previously-terminal descendant acquires
/// a child. Rather than eagerly walking back up the ancestor chain on every new
/// edge, staleness is detected lazily the next time a traversal touches that
/// ancestor, and only the entries that actually changed are replaced -- the
/// elements of the cached set that are still childless are carried over as-is.
pub struct TerminalEngine {
    terminal: Links,
    cache: LruCache<BlockRef, BTreeSet<BlockRef>>,
}

impl TerminalEngine {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap());
        Self { terminal: Links::single(BlockRef::GENESIS), cache: LruCache::new(capacity) }
    }

    pub fn terminal(&self) -> &Links {
        &self.terminal
    }

    /// The transitive forward closure of `start`'s tips, per spec §4.D.
    pub fn closure(&mut self, start: &Links, forward: &ForwardAdjacency) -> ChainResult<BTreeSet<BlockRef>> {
        let mut out = BTreeSet::new();
        for r in start {
            let mut visited = BTreeSet::new();
            out.extend(self.closure_one(*r, forward, &mut visited)?);
        }
        Ok(out)
    }

    /// Applies the ingest update rule: the terminal set becomes the union of the
    /// closure rooted at the newly ingested ref and the closure of the previous
    /// terminal set.
    pub fn update(&mut self, new_ref: BlockRef, forward: &ForwardAdjacency) -> ChainResult<()> {
        let mut result = BTreeSet::new();
        {
            let mut visited = BTreeSet::new();
            result.extend(self.closure_one(new_ref, forward, &mut visited)?);
        }
        for t in self.terminal.as_slice().to_vec() {
            let mut visited = BTreeSet::new();
            result.extend(self.closure_one(t, forward, &mut visited)?);
        }
        self.terminal = Links::new(result.into_iter().collect());
        Ok(())
    }

    fn closure_one(&mut self, r: BlockRef, forward: &ForwardAdjacency, visited: &mut BTreeSet<BlockRef>) -> ChainResult<BTreeSet<BlockRef>> {
        if !forward.has_children(&r) {
            return Ok(BTreeSet::from([r]));
        }
        if !visited.insert(r) {
            return Err(ChainError::CycleDetected(r));
        }

        let result = if let Some(cached) = self.cache.get(&r).cloned() {
            let mut out = BTreeSet::new();
            let mut stale = false;
            for c in &cached {
                if forward.has_children(c) {
                    stale = true;
                    out.extend(self.closure_one(*c, forward, visited)?);
                } else {
                    out.insert(*c);
                }
            }
            if stale {
                log::trace!("rewriting stale terminal-closure cache entry for {r:?}");
                self.cache.put(r, out.clone());
            }
            out
        } else {
            let children = forward.children_of(&r).cloned().unwrap_or_default();
            let mut out = BTreeSet::new();
            for child in &children {
                out.extend(self.closure_one(*child, forward, visited)?);
            }
            self.cache.put(r, out.clone());
            out
        };

        visited.remove(&r);
        Ok(result)
    }
}

impl Default for TerminalEngine {
    fn default() -> Self {
        Self::new()
    }
}
