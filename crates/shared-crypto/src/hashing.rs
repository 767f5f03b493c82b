//! # BLAKE3 Digests
//!
//! Content digest collaborator: arbitrary bytes in, 32 bytes out,
//! deterministic. Addresses are the digest of the owner's public key.

use blake3::Hasher;

/// BLAKE3 digest output (256-bit).
pub type Digest = [u8; 32];

/// Stateful BLAKE3 hasher for multi-part inputs.
pub struct Blake3Hasher {
    inner: Hasher,
}

impl Blake3Hasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self {
            inner: Hasher::new(),
        }
    }

    /// Update with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Finalize and return the digest.
    pub fn finalize(&self) -> Digest {
        *self.inner.finalize().as_bytes()
    }
}

impl Default for Blake3Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Digest data with BLAKE3 (one-shot).
pub fn blake3_hash(data: &[u8]) -> Digest {
    *blake3::hash(data).as_bytes()
}

/// Digest the concatenation of several inputs without copying them together.
pub fn blake3_hash_many(inputs: &[&[u8]]) -> Digest {
    let mut hasher = Blake3Hasher::new();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize()
}

/// Derive the 32-byte account address of a public key.
///
/// `address = blake3(public_key)`
pub fn address_from_public_key(public_key: &[u8; 32]) -> Digest {
    blake3_hash(public_key)
}
