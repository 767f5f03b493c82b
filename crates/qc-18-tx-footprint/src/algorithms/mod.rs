//! # Algorithms
//!
//! Header codecs, size estimation, attestation and round assembly.

pub mod attestation;
pub mod consensus_builder;
pub mod header_codec;
pub mod size_estimator;

pub use attestation::{
    sign_envelope, sign_origin, signed_stamp, transaction_hash, verify_envelope_signature,
    verify_origin_signature, verify_stamp,
};
pub use consensus_builder::{
    ConsensusParticipants, ConsensusRoundBuilder, RoundOptions, REFERENCE_CODE,
};
pub use header_codec::{
    encode_headers, measure_headers, pack_headers_dense, pack_headers_tagged,
    unpack_headers_dense, unpack_headers_tagged, EncodedSize, HeaderEncoding, DENSE_ENTRY_BYTES,
};
pub use size_estimator::{
    estimate_size, header_literal_size, FootprintReport, SizeEstimator, SizeMode,
};
