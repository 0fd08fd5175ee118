use crate::refs::SeqNo;
use chainview_hashes::ShortHash;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Records every `(seq, hash)` pair seen so far, indexed by height.
///
/// Grounded on the relations/tips store split in the teacher: a plain in-memory
/// map guarded by the caller (here, `ChainView`'s single mutex) rather than a
/// `RwLock` of its own, since every mutation to chain state happens as one
/// critical section together with the other three components.
#[derive(Clone, Debug, Default)]
pub struct VersionIndex {
    by_seq: BTreeMap<SeqNo, BTreeSet<ShortHash>>,
    max_known_seq: Option<SeqNo>,
}

impl VersionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a `(seq, hash)` pair. Idempotent: recording the same pair twice
    /// is a no-op.
    pub fn record(&mut self, seq: SeqNo, hash: ShortHash) {
        self.by_seq.entry(seq).or_default().insert(hash);
        self.max_known_seq = Some(self.max_known_seq.map_or(seq, |m| m.max(seq)));
    }

    /// Whether any hash has been recorded at this height.
    pub fn contains(&self, seq: SeqNo) -> bool {
        self.by_seq.contains_key(&seq)
    }

    /// Whether this exact `(seq, hash)` pair has been recorded.
    pub fn has_hash(&self, seq: SeqNo, hash: &ShortHash) -> bool {
        self.by_seq.get(&seq).is_some_and(|hashes| hashes.contains(hash))
    }

    pub fn hashes_at(&self, seq: SeqNo) -> Option<&BTreeSet<ShortHash>> {
        self.by_seq.get(&seq)
    }

    pub fn max_known_seq(&self) -> Option<SeqNo> {
        self.max_known_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(b: &[u8; 4]) -> ShortHash {
        ShortHash::from_bytes(*b)
    }

    #[test]
    fn record_is_idempotent() {
        let mut v = VersionIndex::new();
        v.record(5, h(b"aaaa"));
        v.record(5, h(b"aaaa"));
        assert_eq!(v.hashes_at(5).unwrap().len(), 1);
    }

    #[test]
    fn max_known_seq_tracks_the_high_water_mark() {
        let mut v = VersionIndex::new();
        assert_eq!(v.max_known_seq(), None);
        v.record(3, h(b"aaaa"));
        v.record(7, h(b"bbbb"));
        v.record(2, h(b"cccc"));
        assert_eq!(v.max_known_seq(), Some(7));
    }

    #[test]
    fn has_hash_distinguishes_competing_blocks_at_the_same_height() {
        let mut v = VersionIndex::new();
        v.record(4, h(b"aaaa"));
        assert!(v.has_hash(4, &h(b"aaaa")));
        assert!(!v.has_hash(4, &h(b"bbbb")));
        assert!(v.contains(4));
        assert!(!v.contains(5));
    }
}
