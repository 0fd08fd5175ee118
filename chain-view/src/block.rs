/// The caller-supplied view of an ingested block. The core consults exactly
/// these five fields and never looks past them -- signing, full wire decoding,
/// and everything else about a block's representation stays with the caller.
pub trait BlockSource {
    /// The block's full cryptographic digest, hashed down to a `ShortHash` on ingest.
    fn full_hash(&self) -> &[u8];

    /// Raw parent links used when the owning `ChainView` is in `ChainMode::Personal`.
    fn previous(&self) -> Vec<(i64, Vec<u8>)>;

    /// Raw parent links used when the owning `ChainView` is in `ChainMode::Community`.
    fn links(&self) -> Vec<(i64, Vec<u8>)>;

    /// The block's own height under single-author (personal) indexing.
    fn sequence_number(&self) -> i64;

    /// The block's own height under multi-parent (community) indexing.
    fn com_seq_num(&self) -> i64;
}
