//! # Node Header Codecs
//!
//! Two candidate wire formats for a header group:
//!
//! | Encoding | Layout | Framing |
//! |----------|--------|---------|
//! | Dense | `identity ‖ unreachable ‖ ok ‖ master ‖ patch` | none, count known out-of-band |
//! | Tagged | one key-labelled JSON record per header | none, records are self-delimiting |
//!
//! Either output can be piped through a [`PayloadCompressor`]. Random keys
//! are near-entropy, so the compressed dense block may be larger than the raw
//! one; [`measure_headers`] reports both lengths and asserts nothing.

use serde::{Deserialize, Serialize};

use crate::domain::{FootprintError, NodeHeader, PublicKey};
use crate::ports::PayloadCompressor;

/// Flag bytes per dense entry (unreachable, ok, master).
pub const DENSE_FLAG_BYTES: usize = 3;

/// Patch number bytes per dense entry. Values above 255 wrap.
pub const DENSE_PATCH_BYTES: usize = 1;

/// Identity width of a dense entry.
pub const IDENTITY_BYTES: usize = std::mem::size_of::<PublicKey>();

/// Width of one dense entry.
pub const DENSE_ENTRY_BYTES: usize = IDENTITY_BYTES + DENSE_FLAG_BYTES + DENSE_PATCH_BYTES;

/// Header group wire format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderEncoding {
    /// Positional binary packing.
    Dense,
    /// Self-describing labelled records.
    Tagged,
}

/// Raw and compressed length of one encoded group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedSize {
    /// Encoder output length.
    pub raw: usize,
    /// Length after the compressor.
    pub compressed: usize,
}

/// Pack headers positionally.
pub fn pack_headers_dense(headers: &[NodeHeader]) -> Vec<u8> {
    let mut out = Vec::with_capacity(headers.len() * DENSE_ENTRY_BYTES);
    for h in headers {
        out.extend_from_slice(&h.public_key);
        out.push(h.is_unreachable as u8);
        out.push(h.is_ok as u8);
        out.push(h.is_master as u8);
        out.push(h.patch_number as u8);
    }
    out
}

/// Decode a dense block of exactly `count` headers.
///
/// Patch numbers come back truncated to one byte.
pub fn unpack_headers_dense(bytes: &[u8], count: usize) -> Result<Vec<NodeHeader>, FootprintError> {
    let malformed = |expected| FootprintError::MalformedHeaders {
        expected,
        actual: bytes.len(),
    };
    let expected = count
        .checked_mul(DENSE_ENTRY_BYTES)
        .ok_or_else(|| malformed(usize::MAX))?;
    if bytes.len() != expected {
        return Err(malformed(expected));
    }

    bytes
        .chunks_exact(DENSE_ENTRY_BYTES)
        .enumerate()
        .map(|(i, chunk)| {
            let base = i * DENSE_ENTRY_BYTES;
            let mut public_key = [0u8; IDENTITY_BYTES];
            public_key.copy_from_slice(&chunk[..IDENTITY_BYTES]);

            let flag = |at: usize| -> Result<bool, FootprintError> {
                match chunk[at] {
                    0 => Ok(false),
                    1 => Ok(true),
                    value => Err(FootprintError::InvalidFlag {
                        offset: base + at,
                        value,
                    }),
                }
            };

            Ok(NodeHeader {
                public_key,
                is_unreachable: flag(IDENTITY_BYTES)?,
                is_ok: flag(IDENTITY_BYTES + 1)?,
                is_master: flag(IDENTITY_BYTES + 2)?,
                patch_number: chunk[IDENTITY_BYTES + DENSE_FLAG_BYTES] as u16,
            })
        })
        .collect()
}

/// Encode each header as a labelled JSON record and concatenate them.
pub fn pack_headers_tagged(headers: &[NodeHeader]) -> Result<Vec<u8>, FootprintError> {
    let mut out = Vec::new();
    for h in headers {
        serde_json::to_writer(&mut out, h)
            .map_err(|e| FootprintError::EncodingFailure(e.to_string()))?;
    }
    Ok(out)
}

/// Decode concatenated tagged records.
pub fn unpack_headers_tagged(bytes: &[u8]) -> Result<Vec<NodeHeader>, FootprintError> {
    serde_json::Deserializer::from_slice(bytes)
        .into_iter::<NodeHeader>()
        .map(|r| r.map_err(|e| FootprintError::EncodingFailure(e.to_string())))
        .collect()
}

/// Encode with `encoding`.
pub fn encode_headers(
    headers: &[NodeHeader],
    encoding: HeaderEncoding,
) -> Result<Vec<u8>, FootprintError> {
    match encoding {
        HeaderEncoding::Dense => Ok(pack_headers_dense(headers)),
        HeaderEncoding::Tagged => pack_headers_tagged(headers),
    }
}

/// Encode, compress, and report both lengths.
///
/// An empty group costs nothing and never reaches the compressor.
pub fn measure_headers<C: PayloadCompressor + ?Sized>(
    headers: &[NodeHeader],
    encoding: HeaderEncoding,
    compressor: &C,
) -> Result<EncodedSize, FootprintError> {
    if headers.is_empty() {
        return Ok(EncodedSize::default());
    }
    let raw = encode_headers(headers, encoding)?;
    let compressed = compressor.compress(&raw)?;
    Ok(EncodedSize {
        raw: raw.len(),
        compressed: compressed.len(),
    })
}
