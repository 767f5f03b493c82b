//! # Shared Crypto - Identity and Attestation Primitives
//!
//! The crypto collaborator consumed by the footprint subsystem. Nothing here
//! knows about transactions; callers hand in opaque byte strings.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | BLAKE3 | Content digests, address derivation |
//! | `signatures` | Ed25519 | Node and submitter signatures |
//!
//! ## Fixed Widths
//!
//! | Primitive | Bytes |
//! |-----------|-------|
//! | Public key | 32 |
//! | Signature | 64 |
//! | Content digest | 32 |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{address_from_public_key, blake3_hash, blake3_hash_many, Blake3Hasher, Digest};
pub use signatures::{
    verify_detached, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature, PUBLIC_KEY_LEN,
    SIGNATURE_LEN,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
