//! Digest function and the hex digest type.
//!
//! Parents are computed over the *textual* hex representations of their
//! children: `parent = H(hex(left) || hex(right))`.

use core::{fmt, str::FromStr};

use bincode::{Decode, Encode};
use sha2::{Digest as _, Sha256};

use crate::{Error, Result};

/// Width of every digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Width of every digest in hex characters.
pub const DIGEST_HEX_LEN: usize = DIGEST_LEN * 2;

/// A lowercase hex-encoded 32-byte digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Digest(String);

impl Digest {
    /// Parse a digest, requiring exactly 64 lowercase hex characters.
    pub fn from_hex(hex_str: impl Into<String>) -> Result<Self> {
        let hex_str = hex_str.into();
        if hex_str.len() != DIGEST_HEX_LEN {
            return Err(Error::InvalidData(format!(
                "digest must be {} hex characters, got {}",
                DIGEST_HEX_LEN,
                hex_str.len()
            )));
        }
        if !hex_str.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(Error::InvalidData(format!(
                "digest {:?} is not lowercase hex",
                hex_str
            )));
        }
        Ok(Digest(hex_str))
    }

    pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
        Digest(hex::encode(bytes))
    }

    /// The hex text of this digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode to raw bytes.
    pub fn to_bytes(&self) -> Result<[u8; DIGEST_LEN]> {
        let mut out = [0u8; DIGEST_LEN];
        hex::decode_to_slice(&self.0, &mut out)
            .map_err(|e| Error::InvalidData(format!("digest decode error: {}", e)))?;
        Ok(out)
    }

    /// Check that a decoded value still has the canonical shape.
    pub(crate) fn validate(&self) -> Result<()> {
        Digest::from_hex(self.0.as_str()).map(|_| ())
    }

    /// Compare without branching on the position of the first difference.
    pub fn ct_eq(&self, other: &Digest) -> bool {
        let (left, right) = (self.0.as_bytes(), other.0.as_bytes());
        if left.len() != right.len() {
            return false;
        }
        let diff = left.iter().zip(right).fold(0u8, |acc, (a, b)| acc | (a ^ b));
        diff == 0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Digest {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Digest::from_hex(value)
    }
}

impl TryFrom<&str> for Digest {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Digest::from_hex(value)
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Digest::from_hex(s)
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

/// The one-way function used for leaves and parents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256, the reference algorithm.
    #[default]
    Sha256,
    /// BLAKE3 with its default 32-byte output.
    Blake3,
}

impl HashAlgorithm {
    /// Hash a leaf value.
    pub fn hash(&self, bytes: &[u8]) -> Digest {
        match self {
            HashAlgorithm::Sha256 => Digest::from_bytes(&Sha256::digest(bytes)),
            HashAlgorithm::Blake3 => Digest::from_bytes(blake3::hash(bytes).as_bytes()),
        }
    }

    /// Hash the concatenated hex text of two digests.
    pub fn hash_pair(&self, left: &Digest, right: &Digest) -> Digest {
        match self {
            HashAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(left.as_str().as_bytes());
                hasher.update(right.as_str().as_bytes());
                Digest::from_bytes(&hasher.finalize())
            }
            HashAlgorithm::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                hasher.update(left.as_str().as_bytes());
                hasher.update(right.as_str().as_bytes());
                Digest::from_bytes(hasher.finalize().as_bytes())
            }
        }
    }

    /// Lowercase name accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "blake3" => Ok(HashAlgorithm::Blake3),
            other => Err(Error::InvalidConfig(format!(
                "unknown hash algorithm {:?}",
                other
            ))),
        }
    }
}
