//! # Domain Errors
//!
//! Error taxonomy for envelope assembly, header encoding and size estimation.
//! Every error is returned to the immediate caller; none are retried since
//! the inputs are static.

use super::value_objects::{HeaderGroup, PublicKey};
use thiserror::Error;

/// Footprint error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FootprintError {
    /// Required identity, signature or payload slice is absent.
    ///
    /// Only raised under `FieldPolicy::Strict`; the lenient policy prices
    /// the field at zero bytes.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Tagged (structured) encoding could not be produced.
    #[error("Encoding failed: {0}")]
    EncodingFailure(String),

    /// The compressor reported an error.
    #[error("Compression failed: {0}")]
    CompressionFailure(String),

    /// A set-once slot was written twice, or a signed field was amended.
    #[error("Immutable field already set: {0}")]
    ImmutabilityViolation(&'static str),

    /// A node submitted a second cross-validation.
    #[error("Duplicate cross-validation from node {}", short_id(.0))]
    DuplicateVote(PublicKey),

    /// A header group is outside its consensus sizing bounds.
    #[error("{group} group has {actual} headers, expected {min}..={max}")]
    GroupCardinality {
        /// Offending group
        group: HeaderGroup,
        /// Headers present
        actual: usize,
        /// Lower bound
        min: usize,
        /// Upper bound
        max: usize,
    },

    /// Cross-validation count does not match the validation group.
    #[error("Expected {expected} cross-validations, got {actual}")]
    CrossValidationCount {
        /// Validation group size minus the master
        expected: usize,
        /// Stamps attached
        actual: usize,
    },

    /// Validation group does not flag exactly one master.
    #[error("Validation group flags {0} masters, expected 1")]
    MasterCount(usize),

    /// Envelope address is not the digest of the submitter key.
    #[error("Address does not match submitter public key")]
    AddressMismatch,

    /// Dense header block has the wrong length for the declared count.
    #[error("Malformed dense header block: expected {expected} bytes, got {actual}")]
    MalformedHeaders {
        /// `count * entry width`
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },

    /// A dense flag byte was neither 0 nor 1.
    #[error("Invalid flag byte {value} at offset {offset}")]
    InvalidFlag {
        /// Byte offset in the block
        offset: usize,
        /// Byte found
        value: u8,
    },
}

fn short_id(key: &PublicKey) -> String {
    hex::encode(&key[..4])
}
