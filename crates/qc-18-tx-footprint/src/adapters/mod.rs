//! # Adapters
//!
//! Concrete compressor and signature scheme behind the outbound ports.

pub mod compression;
pub mod signer;

pub use compression::{CompressionConfig, NoOpCompressor, ZstdCompressor};
pub use signer::{Ed25519Verifier, ParticipantKeys};
