//! # Transaction Footprint Report
//!
//! Builds one reference consensus round with fresh keys and logs the size of
//! the resulting envelope under every strategy.
//!
//! Log verbosity follows `RUST_LOG`, falling back to `QC_LOG_LEVEL` and then
//! `info`. Estimation settings come from `FootprintConfig::from_env`.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use qc_18_tx_footprint::{
    ConsensusRoundBuilder, FootprintApi, FootprintConfig, FootprintService, HeaderEncoding,
    HeaderGroup, ParticipantKeys, RoundOptions, SizeMode, Timestamp,
};
use qc_18_tx_footprint::domain::STORAGE_GROUP_MAX;

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(std::env::var("QC_LOG_LEVEL").unwrap_or_else(|_| "info".into())))
        .context("invalid log filter")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to install subscriber")?;
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let config = FootprintConfig::from_env();
    info!(
        compression_level = config.compression_level,
        field_policy = ?config.field_policy,
        enforce_group_sizes = config.enforce_group_sizes,
        "Starting footprint report"
    );

    let keys = ParticipantKeys::generate(STORAGE_GROUP_MAX);
    let options = RoundOptions {
        timestamp: Timestamp::now(),
        ..keys.reference_options()
    };
    let env = ConsensusRoundBuilder::new(options)
        .build(&keys.participants())
        .context("failed to assemble reference round")?;

    let service = FootprintService::with_zstd(config);
    let report = service
        .report(&env)
        .context("failed to estimate envelope size")?;

    info!(
        address = %hex::encode(env.address()),
        bytes = report.transaction_only,
        "Transaction only"
    );
    for mode in SizeMode::ALL {
        info!(bytes = report.get(mode), mode = ?mode, "Envelope size");
    }

    let mv = env
        .master_validation()
        .context("reference round has no master validation")?;
    for group in HeaderGroup::ALL {
        let headers = mv.headers(group);
        for encoding in [HeaderEncoding::Dense, HeaderEncoding::Tagged] {
            let size = service
                .measure_headers(headers, encoding)
                .with_context(|| format!("failed to measure {group} headers"))?;
            info!(
                group = %group,
                encoding = ?encoding,
                count = headers.len(),
                raw = size.raw,
                compressed = size.compressed,
                "Header group"
            );
        }
    }

    Ok(())
}
