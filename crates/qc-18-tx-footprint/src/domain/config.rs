//! Footprint configuration from environment variables.

use std::env;

use super::value_objects::FieldPolicy;

/// Default zstd level for header compression.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;

/// Configuration for size estimation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootprintConfig {
    /// zstd level used for the compressed header strategies.
    /// Fixed per run so repeated estimates are identical.
    pub compression_level: i32,
    /// Treatment of absent required fields.
    pub field_policy: FieldPolicy,
    /// Check consensus group sizes and cross-validation count before estimating.
    pub enforce_group_sizes: bool,
}

impl Default for FootprintConfig {
    fn default() -> Self {
        Self {
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            field_policy: FieldPolicy::Lenient,
            enforce_group_sizes: false,
        }
    }
}

impl FootprintConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_FOOTPRINT_COMPRESSION_LEVEL`: zstd level (default: 3)
    /// - `QC_FOOTPRINT_STRICT`: fail on missing fields (default: false)
    /// - `QC_FOOTPRINT_ENFORCE_GROUPS`: check group sizes (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            compression_level: env::var("QC_FOOTPRINT_COMPRESSION_LEVEL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.compression_level),

            field_policy: if env::var("QC_FOOTPRINT_STRICT")
                .map(|v| parse_flag(&v))
                .unwrap_or(false)
            {
                FieldPolicy::Strict
            } else {
                FieldPolicy::Lenient
            },

            enforce_group_sizes: env::var("QC_FOOTPRINT_ENFORCE_GROUPS")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.enforce_group_sizes),
        }
    }

    /// Production settings: strict fields and group checks.
    pub fn strict() -> Self {
        Self {
            field_policy: FieldPolicy::Strict,
            enforce_group_sizes: true,
            ..Self::default()
        }
    }

    /// Create config for testing (fast compression, lenient).
    pub fn for_testing() -> Self {
        Self {
            compression_level: 1,
            ..Self::default()
        }
    }
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}
