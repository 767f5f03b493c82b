//! # Outbound Ports
//!
//! Collaborators the core consumes but does not implement: a lossless
//! compressor and a signature scheme.

use crate::domain::{FootprintError, PublicKey, Signature};
use std::io;
use thiserror::Error;

/// Errors during compression/decompression.
#[derive(Debug, Error)]
pub enum CompressionError {
    /// Compression failed
    #[error("Compression failed: {0}")]
    CompressFailed(io::Error),
    /// Decompression failed
    #[error("Decompression failed: {0}")]
    DecompressFailed(io::Error),
}

impl From<CompressionError> for FootprintError {
    fn from(err: CompressionError) -> Self {
        FootprintError::CompressionFailure(err.to_string())
    }
}

/// Generic lossless compressor at a fixed level.
///
/// Implementations release their stream state before returning, on success
/// and on error alike.
pub trait PayloadCompressor: Send + Sync {
    /// Compress data
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError>;

    /// Decompress data
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError>;

    /// Check if compression is enabled
    fn is_enabled(&self) -> bool;
}

/// A node or submitter able to sign canonical bytes.
pub trait AttestationSigner {
    /// Identity attached to whatever this signer signs.
    fn public_key(&self) -> PublicKey;

    /// Sign a message.
    fn sign(&self, message: &[u8]) -> Signature;
}

/// Signature verification over raw bytes.
pub trait SignatureVerifier: Send + Sync {
    /// True if `signature` is valid for `message` under `public_key`.
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool;
}
