use crate::refs::BlockRef;
use thiserror::Error;

/// Reasons a caller-supplied block is rejected before any state mutation.
#[derive(Debug, Clone, Error)]
pub enum MalformedBlockReason {
    #[error("parent link references a negative sequence number: {0}")]
    NegativeSequenceNumber(i64),
    #[error("parent link references a short hash of invalid length: expected {expected}, found {found}")]
    InvalidShortHashLength { expected: usize, found: usize },
}

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("malformed block: {0}")]
    MalformedBlock(#[from] MalformedBlockReason),

    /// A parent-link cycle was encountered while traversing the forward adjacency graph.
    /// Not one of the three error kinds the store formally promises, but adversarial input
    /// can otherwise recurse `closure` without bound; see the design notes on open questions.
    #[error("cycle detected while computing terminal closure through {0:?}")]
    CycleDetected(BlockRef),
}

pub type ChainResult<T> = std::result::Result<T, ChainError>;
