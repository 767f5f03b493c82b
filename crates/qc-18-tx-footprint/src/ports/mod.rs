//! # Ports
//!
//! Inbound API of the footprint subsystem and the collaborator contracts it
//! consumes.

pub mod inbound;
pub mod outbound;

pub use inbound::FootprintApi;
pub use outbound::{AttestationSigner, CompressionError, PayloadCompressor, SignatureVerifier};
