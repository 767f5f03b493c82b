//! # Size Estimator
//!
//! Four strategies pricing a populated envelope. They share the envelope and
//! validation sizing and differ only in how the three header groups are
//! priced:
//!
//! | Mode | Header groups |
//! |------|---------------|
//! | `WithHeaders` | literal per-header width, uncompressed |
//! | `WithoutHeaders` | zero (floor estimate) |
//! | `CustomCompressedHeaders` | dense packer, compressed |
//! | `TaggedCompressedHeaders` | tagged records, compressed |
//!
//! ## Field widths
//!
//! Identities, digests and signatures use their fixed widths. The type tag is
//! one byte, a status one byte, and a timestamp is budgeted at ten bytes.

use serde::{Deserialize, Serialize};

use super::header_codec::{measure_headers, HeaderEncoding};
use crate::domain::{
    FieldPolicy, FootprintError, HeaderGroup, MasterValidationStamp, NodeHeader,
    TransactionEnvelope, ValidationStamp,
};
use crate::ports::PayloadCompressor;

/// Type tag width.
pub const TX_TYPE_BYTES: usize = 1;

/// Timestamp wire budget.
pub const TIMESTAMP_BYTES: usize = 10;

/// Validation status width.
pub const STATUS_BYTES: usize = 1;

/// Identity / digest width.
pub const KEY_BYTES: usize = 32;

/// Signature width.
pub const SIGNATURE_BYTES: usize = 64;

/// Flags of an uncompressed header (unreachable, ok, master), one byte each.
pub const LITERAL_FLAG_BYTES: usize = 3;

/// Patch number field of an uncompressed header.
pub const LITERAL_PATCH_BYTES: usize = 3;

/// Header-group pricing strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeMode {
    /// Literal header widths.
    WithHeaders,
    /// Header groups omitted.
    WithoutHeaders,
    /// Dense packer, compressed.
    CustomCompressedHeaders,
    /// Tagged encoder, compressed.
    TaggedCompressedHeaders,
}

impl SizeMode {
    /// Every strategy, in report order.
    pub const ALL: [SizeMode; 4] = [
        SizeMode::WithHeaders,
        SizeMode::WithoutHeaders,
        SizeMode::CustomCompressedHeaders,
        SizeMode::TaggedCompressedHeaders,
    ];
}

/// All figures for one envelope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootprintReport {
    /// Fixed envelope fields only.
    pub transaction_only: usize,
    /// `SizeMode::WithHeaders`.
    pub with_headers: usize,
    /// `SizeMode::WithoutHeaders`.
    pub without_headers: usize,
    /// `SizeMode::CustomCompressedHeaders`.
    pub custom_compressed_headers: usize,
    /// `SizeMode::TaggedCompressedHeaders`.
    pub tagged_compressed_headers: usize,
    /// Headers across the three groups.
    pub header_count: usize,
}

impl FootprintReport {
    /// Figure for `mode`.
    pub fn get(&self, mode: SizeMode) -> usize {
        match mode {
            SizeMode::WithHeaders => self.with_headers,
            SizeMode::WithoutHeaders => self.without_headers,
            SizeMode::CustomCompressedHeaders => self.custom_compressed_headers,
            SizeMode::TaggedCompressedHeaders => self.tagged_compressed_headers,
        }
    }
}

/// Uncompressed width of one header.
pub fn header_literal_size(header: &NodeHeader) -> usize {
    LITERAL_FLAG_BYTES + header.public_key.len() + LITERAL_PATCH_BYTES
}

/// Pure sizing over a borrowed compressor.
pub struct SizeEstimator<'a, C: PayloadCompressor + ?Sized> {
    compressor: &'a C,
    policy: FieldPolicy,
}

impl<'a, C: PayloadCompressor + ?Sized> SizeEstimator<'a, C> {
    /// Create an estimator.
    pub fn new(compressor: &'a C, policy: FieldPolicy) -> Self {
        Self { compressor, policy }
    }

    /// Total bytes of `env` under `mode`.
    pub fn estimate(&self, env: &TransactionEnvelope, mode: SizeMode) -> Result<usize, FootprintError> {
        let consensus = self.consensus_size(env)?;
        let headers = match env.master_validation() {
            Some(mv) => self.header_groups_size(mv, mode)?,
            None => 0,
        };
        Ok(self.transaction_only(env)? + consensus + headers)
    }

    /// Every strategy plus the fixed contribution.
    pub fn report(&self, env: &TransactionEnvelope) -> Result<FootprintReport, FootprintError> {
        Ok(FootprintReport {
            transaction_only: self.transaction_only(env)?,
            with_headers: self.estimate(env, SizeMode::WithHeaders)?,
            without_headers: self.estimate(env, SizeMode::WithoutHeaders)?,
            custom_compressed_headers: self.estimate(env, SizeMode::CustomCompressedHeaders)?,
            tagged_compressed_headers: self.estimate(env, SizeMode::TaggedCompressedHeaders)?,
            header_count: env.master_validation().map_or(0, |mv| mv.header_count()),
        })
    }

    /// Fixed envelope fields: address, type, timestamp, payload, submitter
    /// key and both signatures.
    pub fn transaction_only(&self, env: &TransactionEnvelope) -> Result<usize, FootprintError> {
        if env.data().is_empty() && self.policy == FieldPolicy::Strict {
            return Err(FootprintError::MissingField("data"));
        }
        Ok(env.address().len()
            + TX_TYPE_BYTES
            + TIMESTAMP_BYTES
            + env.data().wire_len()
            + self.width(env.previous_public_key(), KEY_BYTES, "previous_public_key")?
            + self.width(env.signature(), SIGNATURE_BYTES, "signature")?
            + self.width(env.origin_signature(), SIGNATURE_BYTES, "origin_signature")?)
    }

    /// One stamp: identity, signature, status, timestamp.
    pub fn validation_size(&self, stamp: &ValidationStamp) -> Result<usize, FootprintError> {
        Ok(self.width(stamp.node_public_key(), KEY_BYTES, "node_public_key")?
            + self.width(stamp.node_signature(), SIGNATURE_BYTES, "node_signature")?
            + self.width(stamp.status().as_ref(), STATUS_BYTES, "status")?
            + TIMESTAMP_BYTES)
    }

    /// Master stamp without its header groups.
    pub fn master_validation_base_size(
        &self,
        mv: &MasterValidationStamp,
    ) -> Result<usize, FootprintError> {
        Ok(mv.proof_of_work.as_bytes().len()
            + mv.previous_validation_nodes.len() * KEY_BYTES
            + mv.transaction_hash.len()
            + self.validation_size(&mv.validation)?)
    }

    /// Cross-validations plus the master stamp without headers.
    pub fn consensus_size(&self, env: &TransactionEnvelope) -> Result<usize, FootprintError> {
        let mut total = 0;
        for stamp in env.cross_validations() {
            total += self.validation_size(stamp)?;
        }
        match env.master_validation() {
            Some(mv) => total += self.master_validation_base_size(mv)?,
            None if self.policy == FieldPolicy::Strict => {
                return Err(FootprintError::MissingField("master_validation"))
            }
            None => {}
        }
        Ok(total)
    }

    /// The three header groups priced under `mode`.
    pub fn header_groups_size(
        &self,
        mv: &MasterValidationStamp,
        mode: SizeMode,
    ) -> Result<usize, FootprintError> {
        let mut total = 0;
        for group in HeaderGroup::ALL {
            let headers = mv.headers(group);
            total += match mode {
                SizeMode::WithHeaders => headers.iter().map(header_literal_size).sum(),
                SizeMode::WithoutHeaders => 0,
                SizeMode::CustomCompressedHeaders => {
                    measure_headers(headers, HeaderEncoding::Dense, self.compressor)?.compressed
                }
                SizeMode::TaggedCompressedHeaders => {
                    measure_headers(headers, HeaderEncoding::Tagged, self.compressor)?.compressed
                }
            };
        }
        Ok(total)
    }

    fn width<T>(
        &self,
        field: Option<&T>,
        width: usize,
        name: &'static str,
    ) -> Result<usize, FootprintError> {
        match (field, self.policy) {
            (Some(_), _) => Ok(width),
            (None, FieldPolicy::Lenient) => Ok(0),
            (None, FieldPolicy::Strict) => Err(FootprintError::MissingField(name)),
        }
    }
}

/// Estimate with a borrowed compressor and the lenient policy.
pub fn estimate_size<C: PayloadCompressor + ?Sized>(
    env: &TransactionEnvelope,
    mode: SizeMode,
    compressor: &C,
) -> Result<usize, FootprintError> {
    SizeEstimator::new(compressor, FieldPolicy::Lenient).estimate(env, mode)
}
