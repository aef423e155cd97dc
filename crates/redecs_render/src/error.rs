//! Asset loading errors.

use std::path::PathBuf;

/// Errors raised while loading a [`TextureAtlas`](crate::TextureAtlas).
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    /// The atlas document is not valid JSON or misses required fields.
    #[error("failed to parse texture atlas: {0}")]
    Parse(#[from] serde_json::Error),

    /// The atlas file could not be read.
    #[error("failed to read texture atlas {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
