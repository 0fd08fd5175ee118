use crate::ranges::{Range, Ranges};
use crate::refs::{BlockRef, Links, SeqNo};
use borsh::io;
use borsh::{BorshDeserialize, BorshSerialize};
use chainview_hashes::{ShortHash, SHORT_HASH_SIZE};
use thiserror::Error;

/// `Frontier.from_bytes`/`FrontierDiff.from_bytes` failed: either the bytes do not
/// parse under the wire format, or they parsed but violated canonical-form
/// constraints (non-ascending `Links`, overlapping or adjacent `Ranges`).
#[derive(Debug, Error)]
#[error("malformed frontier wire payload: {0}")]
pub struct FrontierDecodeError(String);

impl From<io::Error> for FrontierDecodeError {
    fn from(e: io::Error) -> Self {
        Self(e.to_string())
    }
}

// `ShortHash` is a foreign type (defined in `chainview-hashes`), so `BlockRef` and
// `Links` get hand-written Borsh impls here rather than a derive on a type that
// wraps it -- implementing a foreign trait over a foreign type from this crate
// would violate the orphan rule. `Range`/`Ranges` are plain local integers and
// derive directly (see `ranges.rs`), except `Ranges` still needs a manual
// `BorshDeserialize` to reject non-canonical input rather than trust the wire.

impl BorshSerialize for BlockRef {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        self.seq.serialize(writer)?;
        writer.write_all(self.hash.as_bytes())
    }
}

impl BorshDeserialize for BlockRef {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let seq = SeqNo::deserialize_reader(reader)?;
        let mut buf = [0u8; SHORT_HASH_SIZE];
        reader.read_exact(&mut buf)?;
        Ok(BlockRef::new(seq, ShortHash::from_bytes(buf)))
    }
}

impl BorshSerialize for Links {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        self.as_slice().serialize(writer)
    }
}

impl BorshDeserialize for Links {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let refs = Vec::<BlockRef>::deserialize_reader(reader)?;
        Links::try_new_canonical(refs).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }
}

impl BorshSerialize for Ranges {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        self.as_slice().serialize(writer)
    }
}

impl BorshDeserialize for Ranges {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let ranges = Vec::<Range>::deserialize_reader(reader)?;
        Ranges::try_new_canonical(ranges).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }
}

/// The wire-format summary of a `ChainView`: `"t"`/`"h"`/`"i"` in the conceptual
/// key-value map of spec terms, expressed here as a plain ordered struct since
/// Borsh's field order already makes the encoding deterministic and
/// self-describing enough for this closed set of fields.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Frontier {
    pub terminal: Links,
    pub holes: Ranges,
    pub inconsistencies: Links,
}

impl Frontier {
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).expect("Frontier fields are all infallibly serializable")
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FrontierDecodeError> {
        borsh::from_slice(bytes).map_err(FrontierDecodeError::from)
    }
}

/// The result of reconciling a local `ChainView` against a remote `Frontier`.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct FrontierDiff {
    pub missing: Ranges,
    pub conflicts: Links,
}

impl FrontierDiff {
    pub fn empty() -> Self {
        Self { missing: Ranges::empty(), conflicts: Links::empty() }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).expect("FrontierDiff fields are all infallibly serializable")
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FrontierDecodeError> {
        borsh::from_slice(bytes).map_err(FrontierDecodeError::from)
    }
}
