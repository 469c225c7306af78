use crate::random::{SecretKey, KEY_SIZE};
use crate::{FairDiceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TAG_SIZE: usize = 32;

/// Trait for keyed commitment schemes over a committed integer
pub trait CommitmentScheme {
    fn commit(secret_number: u64, key: &SecretKey) -> Result<Tag>;
    fn verify(secret_number: u64, key: &SecretKey, tag: &Tag) -> bool;
}

/// Published authentication tag, shown as upper-case hex
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Tag([u8; TAG_SIZE]);

impl Tag {
    pub fn from_bytes(bytes: [u8; TAG_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; TAG_SIZE] {
        &self.0
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim())
            .map_err(|e| FairDiceError::encoding(format!("Invalid tag hex: {}", e)))?;
        let bytes: [u8; TAG_SIZE] = bytes.try_into().map_err(|v: Vec<u8>| {
            FairDiceError::encoding(format!(
                "Tag must be {} bytes, got {}",
                TAG_SIZE,
                v.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", hex::encode_upper(&self.0[..8]))
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.to_string()
    }
}

impl TryFrom<String> for Tag {
    type Error = FairDiceError;

    fn try_from(s: String) -> Result<Self> {
        Tag::from_hex(&s)
    }
}

/// Parse a 32-byte key from hex (either case)
pub fn key_from_hex(s: &str) -> Result<SecretKey> {
    let bytes = hex::decode(s.trim())
        .map_err(|e| FairDiceError::encoding(format!("Invalid key hex: {}", e)))?;
    bytes.try_into().map_err(|v: Vec<u8>| {
        FairDiceError::encoding(format!(
            "Key must be {} bytes, got {}",
            KEY_SIZE,
            v.len()
        ))
    })
}
