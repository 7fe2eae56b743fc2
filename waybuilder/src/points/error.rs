//! Point list error types.

use std::path::PathBuf;

/// Errors that can occur when reading or writing the stored point list.
#[derive(Debug, thiserror::Error)]
pub enum PointsError {
    /// Filesystem operation failed
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored list is not valid JSON
    #[error("point list {} is malformed: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
