use crate::block::BlockSource;
use crate::error::{ChainResult, MalformedBlockReason};
use crate::refs::{BlockRef, Links, SeqNo};
use crate::reconcile;
use crate::store::{ForwardAdjacency, GapTracker, VersionIndex};
use crate::terminal::TerminalEngine;
use crate::wire::{Frontier, FrontierDiff};
use chainview_hashes::shorten;
use parking_lot::Mutex;

/// Which of a block's two link sets (and which of its two sequence-number
/// fields) a `ChainView` indexes by. Fixed at construction; everything else
/// about the update rules is identical between the two modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainMode {
    /// Single-author linear-with-forks history: parents come from `previous`,
    /// heights from `sequence_number`.
    Personal,
    /// Multi-parent DAG: parents come from `links`, heights from `com_seq_num`.
    Community,
}

#[derive(Default)]
struct Inner {
    versions: VersionIndex,
    forward: ForwardAdjacency,
    gaps: GapTracker,
    terminal: TerminalEngine,
}

/// Per-community (or per-author) DAG chain state: known versions, forward
/// adjacency, gap/fault tracking, and the incrementally maintained terminal
/// set, all behind one exclusive lock.
///
/// The lock is coarse on purpose: the union-closure step of terminal
/// maintenance needs a consistent read of `forward` and the closure cache
/// together, and finer-grained locking (per-height locks, RCU on versions)
/// would break that.
pub struct ChainView {
    mode: ChainMode,
    inner: Mutex<Inner>,
}

impl ChainView {
    pub fn new(mode: ChainMode) -> Self {
        Self { mode, inner: Mutex::new(Inner::default()) }
    }

    pub fn mode(&self) -> ChainMode {
        self.mode
    }

    /// Validates, then ingests, a block: updates the version index, forward
    /// adjacency, gap/fault tracker, and terminal set in that order under a
    /// single critical section. Rejected blocks leave state untouched.
    pub fn add_block(&self, block: &dyn BlockSource) -> ChainResult<()> {
        let (raw_parents, own_seq) = match self.mode {
            ChainMode::Personal => (block.previous(), block.sequence_number()),
            ChainMode::Community => (block.links(), block.com_seq_num()),
        };
        if own_seq < 0 {
            log::debug!("rejecting block with negative sequence number {own_seq}");
            return Err(MalformedBlockReason::NegativeSequenceNumber(own_seq).into());
        }
        let parents = match Links::try_from_raw(&raw_parents) {
            Ok(parents) => parents,
            Err(e) => {
                log::debug!("rejecting malformed block: {e}");
                return Err(e);
            }
        };
        let hash = shorten(block.full_hash());
        let own_ref = BlockRef::new(own_seq as SeqNo, hash);

        let inner = &mut *self.inner.lock();
        let Inner { versions, forward, gaps, terminal } = inner;

        versions.record(own_ref.seq, own_ref.hash);
        forward.link_child(&parents, own_ref);
        gaps.on_block_recorded(own_ref.seq, own_ref, &parents, versions);
        if let Err(e) = terminal.update(own_ref, forward) {
            log::warn!("terminal update for {own_ref:?} failed: {e}; versions/forward/gaps already reflect this block");
            return Err(e);
        }
        Ok(())
    }

    /// A consistent snapshot of the current frontier: terminal set, holes, and
    /// inconsistencies, ready to serialise and send to a peer.
    pub fn frontier(&self) -> Frontier {
        let inner = self.inner.lock();
        reconcile::snapshot_frontier(inner.terminal.terminal(), &inner.gaps)
    }

    /// Diffs this chain's state against a remote peer's frontier summary.
    pub fn reconcile(&self, remote: &Frontier) -> ChainResult<FrontierDiff> {
        let inner = &mut *self.inner.lock();
        let Inner { versions, forward, gaps, terminal } = inner;
        let max_known_seq = versions.max_known_seq().unwrap_or(0);
        reconcile::reconcile(remote, max_known_seq, versions, gaps, terminal, forward)
    }
}

/// Capability abstraction over a chain store: ingest a block, snapshot its
/// frontier, reconcile against a remote one. A persistence-backed
/// implementation can sit behind the same three operations without changing
/// any caller.
pub trait Chain {
    fn ingest(&self, block: &dyn BlockSource) -> ChainResult<()>;
    fn snapshot_frontier(&self) -> Frontier;
    fn reconcile_against(&self, remote: &Frontier) -> ChainResult<FrontierDiff>;
}

impl Chain for ChainView {
    fn ingest(&self, block: &dyn BlockSource) -> ChainResult<()> {
        self.add_block(block)
    }

    fn snapshot_frontier(&self) -> Frontier {
        self.frontier()
    }

    fn reconcile_against(&self, remote: &Frontier) -> ChainResult<FrontierDiff> {
        self.reconcile(remote)
    }
}
