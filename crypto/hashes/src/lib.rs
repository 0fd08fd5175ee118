//! Hash primitives consumed by the chain store.
//!
//! The store itself only ever calls [`shorten`]: blocks are identified by a 4-byte
//! prefix of the SHA-256 digest of their full cryptographic hash. The remaining
//! `*_as_int` helpers mirror the digest primitives the wider overlay (signing,
//! attestation, key derivation -- all out of scope here) is built on, so that a
//! single hashing vocabulary is shared across the codebase.

use sha2::{Digest, Sha256, Sha512};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

pub const SHORT_HASH_SIZE: usize = 4;

/// A 4-byte prefix of a block's full digest -- cheap to compare, cheap to move, and
/// the unit every `BlockRef` in the store is keyed on.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct ShortHash([u8; SHORT_HASH_SIZE]);

impl ShortHash {
    /// The synthetic short hash of the genesis reference `(0, "0000")`.
    pub const GENESIS: ShortHash = ShortHash(*b"0000");

    pub const fn from_bytes(bytes: [u8; SHORT_HASH_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SHORT_HASH_SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for ShortHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for ShortHash {
    type Error = ShortHashError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; SHORT_HASH_SIZE] = value.try_into().map_err(|_| ShortHashError::WrongLength(value.len()))?;
        Ok(Self(bytes))
    }
}

impl Debug for ShortHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ShortHash({})", self)
    }
}

impl Display for ShortHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for ShortHash {
    type Err = ShortHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != SHORT_HASH_SIZE * 2 {
            return Err(ShortHashError::WrongLength(s.len() / 2));
        }
        let mut bytes = [0u8; SHORT_HASH_SIZE];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).map_err(|_| ShortHashError::NotHex)?;
        }
        Ok(Self(bytes))
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ShortHashError {
    #[error("short hash must be exactly {SHORT_HASH_SIZE} bytes, got {0}")]
    WrongLength(usize),
    #[error("short hash string is not valid hex")]
    NotHex,
}

/// Derives the `ShortHash` of a block from its full cryptographic digest:
/// the leading 4 bytes of SHA-256 over that digest.
pub fn shorten(full_hash: &[u8]) -> ShortHash {
    let digest = Sha256::digest(full_hash);
    ShortHash::from_bytes(digest[..SHORT_HASH_SIZE].try_into().expect("SHA-256 digest is 32 bytes"))
}

/// Renders a value the way the overlay's digest primitives expect: strings are
/// truncated per-character to 8 bits, byte strings pass through unchanged.
pub trait ToAsciiBytes {
    fn to_ascii_bytes(&self) -> Vec<u8>;
}

impl ToAsciiBytes for str {
    fn to_ascii_bytes(&self) -> Vec<u8> {
        self.chars().map(|c| c as u32 as u8).collect()
    }
}

impl ToAsciiBytes for [u8] {
    fn to_ascii_bytes(&self) -> Vec<u8> {
        self.to_vec()
    }
}

/// Big-endian integer interpretation of `SHA-256(to_ascii(v))`.
pub fn sha256_as_int(v: &(impl ToAsciiBytes + ?Sized)) -> num_bigint::BigUint {
    num_bigint::BigUint::from_bytes_be(&Sha256::digest(v.to_ascii_bytes()))
}

/// Big-endian integer interpretation of `SHA-512(to_ascii(v))`.
pub fn sha512_as_int(v: &(impl ToAsciiBytes + ?Sized)) -> num_bigint::BigUint {
    num_bigint::BigUint::from_bytes_be(&Sha512::digest(v.to_ascii_bytes()))
}

/// Big-endian integer interpretation of the first 4 bytes of `SHA-256(to_ascii(v))`.
pub fn sha256_4_as_int(v: &(impl ToAsciiBytes + ?Sized)) -> num_bigint::BigUint {
    num_bigint::BigUint::from_bytes_be(&Sha256::digest(v.to_ascii_bytes())[..SHORT_HASH_SIZE])
}
