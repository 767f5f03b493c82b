//! # Header Compression
//!
//! Zstd compressor for encoded header groups.

use crate::domain::DEFAULT_COMPRESSION_LEVEL;
use crate::ports::{CompressionError, PayloadCompressor};

// =============================================================================
// COMPRESSION CONFIGURATION
// =============================================================================

/// Configuration for header compression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionConfig {
    /// Compression level (1-22, default 3)
    pub level: i32,
    /// Enable compression
    pub enabled: bool,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_COMPRESSION_LEVEL,
            enabled: true,
        }
    }
}

impl CompressionConfig {
    /// Create config at a given level
    pub fn with_level(level: i32) -> Self {
        Self {
            level,
            enabled: true,
        }
    }

    /// Create config for testing (fast)
    pub fn for_testing() -> Self {
        Self::with_level(1)
    }
}

// =============================================================================
// ZSTD COMPRESSOR
// =============================================================================

/// Zstd-based compressor.
///
/// Each call owns its encoder, so stream state is released on every exit.
#[derive(Debug, Clone, Default)]
pub struct ZstdCompressor {
    config: CompressionConfig,
}

impl ZstdCompressor {
    /// Create a new Zstd compressor
    pub fn new(config: CompressionConfig) -> Self {
        Self { config }
    }

    /// Level in effect
    pub fn level(&self) -> i32 {
        self.config.level
    }
}

impl PayloadCompressor for ZstdCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        if !self.config.enabled {
            return Ok(data.to_vec());
        }
        zstd::encode_all(data, self.config.level).map_err(CompressionError::CompressFailed)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        if !self.config.enabled {
            return Ok(data.to_vec());
        }
        zstd::decode_all(data).map_err(CompressionError::DecompressFailed)
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }
}

// =============================================================================
// NO-OP COMPRESSOR
// =============================================================================

/// No-op compressor that returns data unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCompressor;

impl PayloadCompressor for NoOpCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        Ok(data.to_vec())
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        Ok(data.to_vec())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zstd_restores_input() {
        let compressor = ZstdCompressor::new(CompressionConfig::for_testing());
        let data = b"header header header header header header".repeat(8);

        let compressed = compressor.compress(&data).unwrap();
        assert!(compressed.len() < data.len());
        assert_eq!(compressor.decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn test_zstd_is_deterministic() {
        let compressor = ZstdCompressor::default();
        let data: Vec<u8> = (0..=255u8).cycle().take(2048).collect();
        assert_eq!(
            compressor.compress(&data).unwrap(),
            compressor.compress(&data).unwrap()
        );
    }

    #[test]
    fn test_disabled_passes_through() {
        let compressor = ZstdCompressor::new(CompressionConfig {
            level: 3,
            enabled: false,
        });
        assert!(!compressor.is_enabled());
        assert_eq!(compressor.compress(b"abc").unwrap(), b"abc");
    }

    #[test]
    fn test_garbage_fails_to_decompress() {
        let compressor = ZstdCompressor::default();
        assert!(matches!(
            compressor.decompress(b"not a zstd frame"),
            Err(CompressionError::DecompressFailed(_))
        ));
    }

    #[test]
    fn test_noop_is_identity() {
        assert_eq!(NoOpCompressor.compress(b"xyz").unwrap(), b"xyz");
        assert!(!NoOpCompressor.is_enabled());
    }
}
