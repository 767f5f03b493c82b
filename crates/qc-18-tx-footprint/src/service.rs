//! # Transaction Footprint Service
//!
//! Application service implementing [`FootprintApi`] over an injected
//! compressor.

use tracing::{debug, instrument};

use crate::adapters::{CompressionConfig, ZstdCompressor};
use crate::algorithms::{
    header_codec, EncodedSize, FootprintReport, HeaderEncoding, SizeEstimator, SizeMode,
};
use crate::domain::{check_envelope_integrity, FootprintConfig, FootprintError, NodeHeader, TransactionEnvelope};
use crate::ports::{FootprintApi, PayloadCompressor};

/// The Transaction Footprint Service.
pub struct FootprintService<C: PayloadCompressor> {
    /// Compressor for the compressed header strategies.
    compressor: C,
    /// Service configuration.
    config: FootprintConfig,
}

impl<C: PayloadCompressor> FootprintService<C> {
    /// Create a service with the given compressor.
    pub fn new(compressor: C, config: FootprintConfig) -> Self {
        Self { compressor, config }
    }

    /// Injected compressor.
    pub fn compressor(&self) -> &C {
        &self.compressor
    }

    fn estimator(&self) -> SizeEstimator<'_, C> {
        SizeEstimator::new(&self.compressor, self.config.field_policy)
    }

    fn check(&self, env: &TransactionEnvelope) -> Result<(), FootprintError> {
        if self.config.enforce_group_sizes {
            check_envelope_integrity(env)?;
        }
        Ok(())
    }
}

impl FootprintService<ZstdCompressor> {
    /// Zstd-backed service at the configured level.
    pub fn with_zstd(config: FootprintConfig) -> Self {
        let compressor = ZstdCompressor::new(CompressionConfig::with_level(config.compression_level));
        Self::new(compressor, config)
    }
}

impl<C: PayloadCompressor> FootprintApi for FootprintService<C> {
    #[instrument(skip_all, fields(mode = ?mode))]
    fn estimate_size(
        &self,
        env: &TransactionEnvelope,
        mode: SizeMode,
    ) -> Result<usize, FootprintError> {
        self.check(env)?;
        let size = self.estimator().estimate(env, mode)?;
        debug!(size, "Estimated envelope size");
        Ok(size)
    }

    #[instrument(skip_all)]
    fn report(&self, env: &TransactionEnvelope) -> Result<FootprintReport, FootprintError> {
        self.check(env)?;
        let report = self.estimator().report(env)?;
        debug!(
            transaction_only = report.transaction_only,
            with_headers = report.with_headers,
            without_headers = report.without_headers,
            custom_compressed = report.custom_compressed_headers,
            tagged_compressed = report.tagged_compressed_headers,
            "Footprint report computed"
        );
        Ok(report)
    }

    fn pack_headers_dense(&self, headers: &[NodeHeader]) -> Vec<u8> {
        header_codec::pack_headers_dense(headers)
    }

    fn pack_headers_tagged(&self, headers: &[NodeHeader]) -> Result<Vec<u8>, FootprintError> {
        header_codec::pack_headers_tagged(headers)
    }

    fn measure_headers(
        &self,
        headers: &[NodeHeader],
        encoding: HeaderEncoding,
    ) -> Result<EncodedSize, FootprintError> {
        let size = header_codec::measure_headers(headers, encoding, &self.compressor)?;
        debug!(
            count = headers.len(),
            encoding = ?encoding,
            raw = size.raw,
            compressed = size.compressed,
            "Measured header group"
        );
        Ok(size)
    }

    fn config(&self) -> &FootprintConfig {
        &self.config
    }
}
