//! # Transaction Footprint (qc-18)
//!
//! Estimates the serialized size of a transaction envelope once a consensus
//! round has attached its metadata, and compares candidate wire encodings for
//! the node headers the round produces.
//!
//! ## Envelope Anatomy
//!
//! ```text
//! TransactionEnvelope
//! ├── address, type, timestamp, payload       (signed)
//! ├── previous_public_key                     (signed, optional)
//! ├── signature, origin_signature
//! ├── cross_validations[4]  ── ValidationStamp
//! └── master_validation
//!     ├── proof_of_work, transaction_hash, validation stamp
//!     └── header groups: welcome[5], validation[5], storage[1..=36]
//! ```
//!
//! ## Size Strategies
//!
//! | Strategy | Header groups priced as |
//! |----------|-------------------------|
//! | With headers | 38 bytes per header, literal |
//! | Without headers | nothing |
//! | Custom compressed | dense 36-byte entries, compressed per group |
//! | Tagged compressed | labelled records, compressed per group |
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Group Cardinality | welcome = 5, validation = 5, storage 1..=36 |
//! | 2 | Single Master | exactly one validation header flags master |
//! | 3 | Cross-Validation Count | validation group minus the master |
//! | 4 | Address Binding | address = BLAKE3(submitter key) |
//! | 5 | Set-Once Signatures | signed fields and stamps cannot be replaced |
//! | 6 | Unique Votes | one cross-validation per node |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Envelope model, errors, invariants, configuration
//! - `algorithms/` - Header codecs, size estimator, attestation, round builder
//! - `ports/` - Inbound API and outbound compressor/signature contracts
//! - `adapters/` - Zstd compressor and Ed25519 binding
//! - `service.rs` - Application service implementing the API
//!
//! ## Usage
//!
//! ```ignore
//! use qc_18_tx_footprint::{
//!     ConsensusRoundBuilder, FootprintApi, FootprintConfig, FootprintService, ParticipantKeys,
//!     SizeMode,
//! };
//!
//! let keys = ParticipantKeys::generate(36);
//! let env = ConsensusRoundBuilder::new(keys.reference_options())
//!     .build(&keys.participants())?;
//!
//! let service = FootprintService::with_zstd(FootprintConfig::from_env());
//! let bytes = service.estimate_size(&env, SizeMode::CustomCompressedHeaders)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::{CompressionConfig, Ed25519Verifier, NoOpCompressor, ParticipantKeys, ZstdCompressor};
pub use algorithms::{
    estimate_size, pack_headers_dense, pack_headers_tagged, unpack_headers_dense,
    unpack_headers_tagged, ConsensusParticipants, ConsensusRoundBuilder, EncodedSize,
    FootprintReport, HeaderEncoding, RoundOptions, SizeEstimator, SizeMode,
};
pub use domain::config::FootprintConfig;
pub use domain::entities::{MasterValidationStamp, NodeHeader, TransactionEnvelope, ValidationStamp};
pub use domain::errors::FootprintError;
pub use domain::value_objects::{
    FieldPolicy, HeaderGroup, PayloadEntry, ProposalSharedOriginKey, Timestamp, TransactionData,
    TxType, ValidationStatus,
};
pub use ports::inbound::FootprintApi;
pub use ports::outbound::{AttestationSigner, CompressionError, PayloadCompressor, SignatureVerifier};
pub use service::FootprintService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
