//! Per-community DAG chain store and frontier-reconciliation engine.
//!
//! A [`ChainView`] accepts blocks in arbitrary arrival order, maintains the
//! DAG's structural state (known versions, forward adjacency, holes,
//! inconsistencies, terminal set), and answers reconciliation queries that
//! turn a remote peer's [`Frontier`] summary into a [`FrontierDiff`]: exactly
//! which heights to request and which locally held blocks are in conflict.
//!
//! Block signing, network transport, community membership, persistence, and
//! attestation all live outside this crate; [`BlockSource`] is the seam where
//! a caller's richer block representation meets this core.

mod block;
mod chain_view;
mod error;
mod ranges;
mod reconcile;
mod refs;
mod store;
mod terminal;
mod wire;

pub use block::BlockSource;
pub use chain_view::{Chain, ChainMode, ChainView};
pub use error::{ChainError, ChainResult, MalformedBlockReason};
pub use ranges::{Range, RangeError, Ranges};
pub use refs::{BlockRef, Links, LinksError, SeqNo};
pub use terminal::DEFAULT_CACHE_CAPACITY;
pub use wire::{Frontier, FrontierDecodeError, FrontierDiff};
