use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{pool} pool must contain at least one item")]
    EmptyPool { pool: &'static str },

    #[error("{field} must be between 0 and 100, got {value}")]
    InvalidPercent { field: &'static str, value: u32 },
}
