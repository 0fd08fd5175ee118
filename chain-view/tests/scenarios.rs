mod common;

use chain_view::{BlockRef, Chain, ChainMode, ChainView, Frontier, Links, Ranges};
use common::TestBlock;
use std::collections::BTreeSet;

#[test]
fn empty_chain_serialises_the_synthetic_genesis_tip() {
    let view = ChainView::new(ChainMode::Personal);
    let frontier = view.snapshot_frontier();
    assert_eq!(frontier.terminal.as_slice(), &[BlockRef::GENESIS]);
    assert!(frontier.holes.is_empty());
    assert!(frontier.inconsistencies.is_empty());
}

#[test]
fn single_genesis_linked_block_becomes_the_sole_tip() {
    let view = ChainView::new(ChainMode::Personal);
    view.ingest(&TestBlock::new(b"b1", vec![(0, b"0000".to_vec())], 1)).unwrap();
    let frontier = view.snapshot_frontier();
    assert_eq!(frontier.terminal.len(), 1);
    assert_ne!(frontier.terminal.as_slice()[0], BlockRef::GENESIS);
}

#[test]
fn large_forward_gap_leaves_a_wide_hole_behind() {
    let view = ChainView::new(ChainMode::Personal);
    let parent_hash = TestBlock::short_hash(b"ghost-parent");
    view.ingest(&TestBlock::new(b"child", vec![(101, parent_hash)], 102)).unwrap();

    let frontier = view.snapshot_frontier();
    assert_eq!(frontier.holes.expand(), (1..=101).collect::<BTreeSet<_>>());
}

#[test]
fn parent_link_cycle_surfaces_as_an_error_not_infinite_recursion() {
    let view = ChainView::new(ChainMode::Personal);
    let a_hash = TestBlock::short_hash(b"a");
    let b_hash = TestBlock::short_hash(b"b");

    // b names a as parent; it will exist once ingested below.
    view.ingest(&TestBlock::new(b"b", vec![(1, a_hash.clone())], 2)).unwrap();
    // a names b as parent, closing the cycle a -> b -> a through forward adjacency.
    let err = view.ingest(&TestBlock::new(b"a", vec![(2, b_hash)], 1)).unwrap_err();
    assert!(matches!(err, chain_view::ChainError::CycleDetected(_)));
}

#[test]
fn scenario_s5_reconcile_missing_range() {
    let view = ChainView::new(ChainMode::Personal);
    let a_hash = TestBlock::short_hash(b"b1");
    view.ingest(&TestBlock::new(b"b1", vec![(0, b"0000".to_vec())], 1)).unwrap();
    view.ingest(&TestBlock::new(b"b2", vec![(1, a_hash)], 2)).unwrap();

    let remote = Frontier { terminal: Links::single(ref_at(5, b"eeee")), holes: Ranges::empty(), inconsistencies: Links::empty() };
    let diff = view.reconcile_against(&remote).unwrap();
    assert_eq!(diff.missing, Ranges::compress(&BTreeSet::from([3, 4, 5])));
    assert!(diff.conflicts.is_empty());
}

#[test]
fn scenario_s6_reconcile_terminal_conflict() {
    let view = ChainView::new(ChainMode::Personal);
    let a_hash = TestBlock::short_hash(b"b1");
    view.ingest(&TestBlock::new(b"b1", vec![(0, b"0000".to_vec())], 1)).unwrap();
    view.ingest(&TestBlock::new(b"b2", vec![(1, a_hash)], 2)).unwrap();

    let remote = Frontier { terminal: Links::single(ref_at(2, b"ffff")), holes: Ranges::empty(), inconsistencies: Links::empty() };
    let diff = view.reconcile_against(&remote).unwrap();
    assert!(diff.missing.is_empty());
    assert_eq!(diff.conflicts.as_slice(), &[ref_at(2, b"ffff")]);
}

#[test]
fn reconcile_against_own_frontier_is_always_empty() {
    let view = ChainView::new(ChainMode::Personal);
    let a_hash = TestBlock::short_hash(b"b1");
    view.ingest(&TestBlock::new(b"b1", vec![(0, b"0000".to_vec())], 1)).unwrap();
    view.ingest(&TestBlock::new(b"b2", vec![(1, a_hash)], 2)).unwrap();

    let own = view.snapshot_frontier();
    let diff = view.reconcile_against(&own).unwrap();
    assert!(diff.missing.is_empty());
    assert!(diff.conflicts.is_empty());
}

#[test]
fn idempotent_ingest_of_the_same_block_twice() {
    let view = ChainView::new(ChainMode::Personal);
    let block = TestBlock::new(b"b1", vec![(0, b"0000".to_vec())], 1);
    view.ingest(&block).unwrap();
    let after_first = view.snapshot_frontier();
    view.ingest(&block).unwrap();
    let after_second = view.snapshot_frontier();
    assert_eq!(after_first, after_second);
}

#[test]
fn ingest_order_does_not_affect_the_converged_terminal_set() {
    let a_hash = TestBlock::short_hash(b"b1");
    let b1 = || TestBlock::new(b"b1", vec![(0, b"0000".to_vec())], 1);
    let b2 = || TestBlock::new(b"b2", vec![(1, a_hash.clone())], 2);

    let forward_order = ChainView::new(ChainMode::Personal);
    forward_order.ingest(&b1()).unwrap();
    forward_order.ingest(&b2()).unwrap();

    let reverse_order = ChainView::new(ChainMode::Personal);
    reverse_order.ingest(&b2()).unwrap();
    reverse_order.ingest(&b1()).unwrap();

    assert_eq!(forward_order.snapshot_frontier(), reverse_order.snapshot_frontier());
}

fn ref_at(seq: u64, hash: &[u8; 4]) -> BlockRef {
    BlockRef::new(seq, chainview_hashes::ShortHash::from_bytes(*hash))
}
