//! # Inbound Ports (Driving Ports)
//!
//! The primary API for the Transaction Footprint subsystem.

use crate::algorithms::{EncodedSize, FootprintReport, HeaderEncoding, SizeMode};
use crate::domain::{FootprintConfig, FootprintError, NodeHeader, TransactionEnvelope};

/// Primary API for the Transaction Footprint subsystem.
///
/// Every operation is pure over its inputs: repeated calls on the same
/// envelope return the same figures.
pub trait FootprintApi {
    /// Total serialized size of `env` under `mode`.
    ///
    /// ## Errors
    ///
    /// - `MissingField`: strict policy and a required field is absent
    /// - `EncodingFailure`: tagged encoding failed
    /// - `CompressionFailure`: the compressor failed
    /// - `GroupCardinality`, `CrossValidationCount`, `MasterCount`,
    ///   `AddressMismatch`: group checks enabled and violated
    fn estimate_size(&self, env: &TransactionEnvelope, mode: SizeMode)
        -> Result<usize, FootprintError>;

    /// Every strategy for `env` plus the transaction-only figure.
    fn report(&self, env: &TransactionEnvelope) -> Result<FootprintReport, FootprintError>;

    /// Dense positional encoding of one header group.
    fn pack_headers_dense(&self, headers: &[NodeHeader]) -> Vec<u8>;

    /// Labelled record encoding of one header group.
    fn pack_headers_tagged(&self, headers: &[NodeHeader]) -> Result<Vec<u8>, FootprintError>;

    /// Raw and compressed length of one group under `encoding`.
    fn measure_headers(
        &self,
        headers: &[NodeHeader],
        encoding: HeaderEncoding,
    ) -> Result<EncodedSize, FootprintError>;

    /// Configuration in effect.
    fn config(&self) -> &FootprintConfig;
}
