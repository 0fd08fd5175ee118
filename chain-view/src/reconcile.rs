use crate::error::ChainResult;
use crate::ranges::Ranges;
use crate::refs::{BlockRef, Links, SeqNo};
use crate::store::forward::ForwardAdjacency;
use crate::store::gaps::GapTracker;
use crate::store::versions::VersionIndex;
use crate::terminal::TerminalEngine;
use crate::wire::{Frontier, FrontierDiff};
use std::collections::BTreeSet;

/// Builds the wire-format summary of the current chain state.
pub fn snapshot_frontier(terminal: &Links, gaps: &GapTracker) -> Frontier {
    Frontier {
        terminal: terminal.clone(),
        holes: Ranges::compress(gaps.holes()),
        inconsistencies: Links::new(gaps.inconsistencies().iter().copied().collect()),
    }
}

/// Diffs the local chain state against a remote's frontier summary: which
/// heights the remote holds that we don't, and which of our known blocks the
/// remote appears to disagree with or implicitly contradict.
pub fn reconcile(
    remote: &Frontier,
    max_known_seq: SeqNo,
    versions: &VersionIndex,
    gaps: &GapTracker,
    terminal_engine: &mut TerminalEngine,
    forward: &ForwardAdjacency,
) -> ChainResult<FrontierDiff> {
    let missing = missing_ranges(remote, max_known_seq, gaps);
    let conflicts = conflicting_refs(remote, versions, gaps, terminal_engine, forward)?;
    Ok(FrontierDiff { missing, conflicts })
}

fn missing_ranges(remote: &Frontier, max_known_seq: SeqNo, gaps: &GapTracker) -> Ranges {
    let remote_max = remote.terminal.as_slice().iter().map(|r| r.seq).max().unwrap_or(0);
    let remote_holes = remote.holes.expand();
    let remote_known: BTreeSet<SeqNo> = (1..=remote_max).filter(|s| !remote_holes.contains(s)).collect();
    let local_known: BTreeSet<SeqNo> = (1..=max_known_seq).filter(|s| !gaps.holes().contains(s)).collect();
    Ranges::compress(&remote_known.difference(&local_known).copied().collect())
}

fn conflicting_refs(
    remote: &Frontier,
    versions: &VersionIndex,
    gaps: &GapTracker,
    terminal_engine: &mut TerminalEngine,
    forward: &ForwardAdjacency,
) -> ChainResult<Links> {
    let mut conflicts = BTreeSet::new();

    // Terminal conflict: remote's claimed tip disagrees with our stored set at that height.
    for t in remote.terminal.as_slice() {
        if versions.contains(t.seq) && !versions.has_hash(t.seq, &t.hash) {
            conflicts.insert(*t);
        }
    }

    // Inconsistency escalation: the remote authoritatively accepts a descendant of
    // something we consider broken, without itself flagging it as broken or missing.
    let remote_terminal: BTreeSet<BlockRef> = remote.terminal.as_slice().iter().copied().collect();
    let remote_inconsistencies: BTreeSet<BlockRef> = remote.inconsistencies.as_slice().iter().copied().collect();
    for inc in gaps.inconsistencies() {
        let descendants = terminal_engine.closure(&Links::single(*inc), forward)?;
        let escalates = descendants.iter().any(|d| {
            remote_terminal.contains(d) && !remote_inconsistencies.contains(d) && !remote.holes.contains(d.seq)
        });
        if escalates {
            conflicts.insert(*inc);
        }
    }

    Ok(Links::new(conflicts.into_iter().collect()))
}
