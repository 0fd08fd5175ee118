use crate::error::{ChainError, MalformedBlockReason};
use chainview_hashes::ShortHash;
use std::fmt::Debug;

/// A non-negative height in the DAG. 0 is the synthetic genesis height.
pub type SeqNo = u64;

/// The canonical identity of a block: its height plus its short hash.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockRef {
    pub seq: SeqNo,
    pub hash: ShortHash,
}

impl BlockRef {
    pub const fn new(seq: SeqNo, hash: ShortHash) -> Self {
        Self { seq, hash }
    }

    /// The synthetic genesis reference `(0, "0000")` every fresh chain starts terminal at.
    pub const GENESIS: BlockRef = BlockRef::new(0, ShortHash::GENESIS);
}

impl Debug for BlockRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.seq, self.hash)
    }
}

/// An ordered, deduplicated sequence of [`BlockRef`], ascending by `(seq, hash)`.
///
/// Construction from already-known-good data (e.g. a freshly computed closure) always
/// canonicalizes silently. Construction from wire bytes instead rejects non-canonical
/// input outright -- see [`crate::wire`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Links(Vec<BlockRef>);

impl Links {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn single(r: BlockRef) -> Self {
        Self(vec![r])
    }

    /// Builds a canonical `Links` out of a caller-supplied collection, silently sorting
    /// and deduplicating. Used for locally-derived data (traversal results, parent sets
    /// read off an already-validated block) where the order is incidental, not a promise
    /// from an untrusted producer.
    pub fn new(mut refs: Vec<BlockRef>) -> Self {
        refs.sort_unstable();
        refs.dedup();
        Self(refs)
    }

    /// Validates and canonicalizes the raw `(seq, hash)` pairs off an ingested block's
    /// parent links. Rejects (without mutating any state) a negative sequence number or
    /// a short hash of the wrong length -- the only two ways a block can be malformed.
    pub fn try_from_raw(raw: &[(i64, Vec<u8>)]) -> Result<Self, ChainError> {
        let mut refs = Vec::with_capacity(raw.len());
        for (seq, hash) in raw {
            if *seq < 0 {
                return Err(MalformedBlockReason::NegativeSequenceNumber(*seq).into());
            }
            let hash = ShortHash::try_from(hash.as_slice())
                .map_err(|_| MalformedBlockReason::InvalidShortHashLength { expected: chainview_hashes::SHORT_HASH_SIZE, found: hash.len() })?;
            refs.push(BlockRef::new(*seq as SeqNo, hash));
        }
        Ok(Self::new(refs))
    }

    /// Validates canonical form (strictly ascending, no duplicates) of links that
    /// arrived over the wire, rather than silently re-sorting a producer's mistake.
    pub fn try_new_canonical(refs: Vec<BlockRef>) -> Result<Self, LinksError> {
        for w in refs.windows(2) {
            if w[0] >= w[1] {
                return Err(LinksError::NotCanonical { prev: w[0], next: w[1] });
            }
        }
        Ok(Self(refs))
    }

    pub fn as_slice(&self) -> &[BlockRef] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, r: &BlockRef) -> bool {
        self.0.binary_search(r).is_ok()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BlockRef> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<BlockRef> {
        self.0
    }
}

impl IntoIterator for Links {
    type Item = BlockRef;
    type IntoIter = std::vec::IntoIter<BlockRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Links {
    type Item = &'a BlockRef;
    type IntoIter = std::slice::Iter<'a, BlockRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<BlockRef> for Links {
    fn from_iter<T: IntoIterator<Item = BlockRef>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LinksError {
    #[error("links are not strictly ascending and deduplicated: {prev:?} does not precede {next:?}")]
    NotCanonical { prev: BlockRef, next: BlockRef },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(seq: SeqNo, hash: &[u8; 4]) -> BlockRef {
        BlockRef::new(seq, ShortHash::from_bytes(*hash))
    }

    #[test]
    fn new_sorts_and_dedups() {
        let links = Links::new(vec![r(2, b"bbbb"), r(1, b"aaaa"), r(2, b"bbbb")]);
        assert_eq!(links.as_slice(), &[r(1, b"aaaa"), r(2, b"bbbb")]);
    }

    #[test]
    fn try_from_raw_rejects_negative_seq() {
        let err = Links::try_from_raw(&[(-1, b"aaaa".to_vec())]).unwrap_err();
        assert!(matches!(err, ChainError::MalformedBlock(MalformedBlockReason::NegativeSequenceNumber(-1))));
    }

    #[test]
    fn try_from_raw_rejects_bad_hash_length() {
        let err = Links::try_from_raw(&[(1, b"aa".to_vec())]).unwrap_err();
        assert!(matches!(err, ChainError::MalformedBlock(MalformedBlockReason::InvalidShortHashLength { expected: 4, found: 2 })));
    }

    #[test]
    fn try_from_raw_accepts_genesis_link() {
        let links = Links::try_from_raw(&[(0, b"0000".to_vec())]).unwrap();
        assert_eq!(links.as_slice(), &[BlockRef::GENESIS]);
    }

    #[test]
    fn try_new_canonical_rejects_out_of_order_refs() {
        let err = Links::try_new_canonical(vec![r(2, b"bbbb"), r(1, b"aaaa")]).unwrap_err();
        assert!(matches!(err, LinksError::NotCanonical { .. }));
    }

    #[test]
    fn try_new_canonical_rejects_duplicates() {
        let err = Links::try_new_canonical(vec![r(1, b"aaaa"), r(1, b"aaaa")]).unwrap_err();
        assert!(matches!(err, LinksError::NotCanonical { .. }));
    }
}
