use chain_view::BlockSource;

/// A minimal stand-in for a real signed block: the core only ever reads these
/// five fields off whatever the caller passes to `ChainView::add_block`.
pub struct TestBlock {
    pub full_hash: Vec<u8>,
    pub parents: Vec<(i64, Vec<u8>)>,
    pub seq: i64,
}

impl TestBlock {
    pub fn new(full_hash: &[u8], parents: Vec<(i64, Vec<u8>)>, seq: i64) -> Self {
        Self { full_hash: full_hash.to_vec(), parents, seq }
    }

    pub fn short_hash(full_hash: &[u8]) -> Vec<u8> {
        chainview_hashes::shorten(full_hash).as_bytes().to_vec()
    }
}

impl BlockSource for TestBlock {
    fn full_hash(&self) -> &[u8] {
        &self.full_hash
    }
    fn previous(&self) -> Vec<(i64, Vec<u8>)> {
        self.parents.clone()
    }
    fn links(&self) -> Vec<(i64, Vec<u8>)> {
        self.parents.clone()
    }
    fn sequence_number(&self) -> i64 {
        self.seq
    }
    fn com_seq_num(&self) -> i64 {
        self.seq
    }
}
