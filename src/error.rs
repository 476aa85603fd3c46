// Error module for release table configuration failures

use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems with the hand-authored release table.
///
/// Any of these aborts the whole derivation; callers never receive
/// partial output.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read release table {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write release table {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid release table {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error(
        "unsupported release table format for {} (expected .toml, .json, .yaml or .yml)",
        path.display()
    )]
    UnsupportedFormat { path: PathBuf },

    #[error("release table contains an empty version key")]
    EmptyVersion,

    #[error("checksum algorithm name '{name}' is reserved")]
    ReservedAlgorithm { name: String },
}
