//! Error types of the publisher.
//! Setup failures are `ConfigError`, per-artifact failures are `UploadError`.
use std::path::PathBuf;
use thiserror::Error;

#[macro_export]
macro_rules! logerr {
    () => {
        |e| {
            tracing::error!(error = ?e, msg = e.to_string());
        }
    };
}

/// Errors that abort `Setup`, before any artifact is attempted
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid destination `{destination}`: {reason}")]
    InvalidDestination {
        destination: String,
        reason: &'static str,
    },
    #[error("Error loading AWS credentials: {0} is not set")]
    MissingCredentials(&'static str),
    #[error("Unknown AWS Region `{0}`")]
    UnknownRegion(String),
    #[error("Could not find bucket `{bucket}` in region `{region}` ({source})")]
    BucketUnreachable {
        bucket: String,
        region: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Errors of a single `Upload` call; sibling uploads are not affected
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Failed to read file {} ({source})", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to PUT file {key} ({source})")]
    WriteFailed {
        key: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("Upload of {key} was cancelled")]
    Cancelled { key: String },
}
