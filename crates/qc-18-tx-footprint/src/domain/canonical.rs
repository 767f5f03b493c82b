//! Canonical byte writer for signing messages.
//!
//! Field order is fixed by the caller. Absent optional fields write nothing.

use super::errors::FootprintError;

/// Append-only writer producing the bytes that are signed and verified.
#[derive(Default)]
pub(crate) struct CanonicalWriter {
    out: Vec<u8>,
}

impl CanonicalWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn u8(&mut self, v: u8) -> &mut Self {
        self.out.push(v);
        self
    }

    pub(crate) fn u64_le(&mut self, v: u64) -> &mut Self {
        self.out.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub(crate) fn fixed(&mut self, bytes: &[u8]) -> &mut Self {
        self.out.extend_from_slice(bytes);
        self
    }

    pub(crate) fn optional(&mut self, bytes: Option<&[u8]>) -> &mut Self {
        if let Some(bytes) = bytes {
            self.out.extend_from_slice(bytes);
        }
        self
    }

    /// u32 little-endian length, then the bytes.
    pub(crate) fn prefixed(&mut self, bytes: &[u8]) -> Result<&mut Self, FootprintError> {
        let len: u32 = bytes.len().try_into().map_err(|_| {
            FootprintError::EncodingFailure(format!("field of {} bytes exceeds u32", bytes.len()))
        })?;
        self.out.extend_from_slice(&len.to_le_bytes());
        self.out.extend_from_slice(bytes);
        Ok(self)
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.out
    }
}
