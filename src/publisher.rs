use crate::artifact::Artifact;
use crate::destination::path_segments;
use crate::error::UploadError;
use crate::resolver::UploadTarget;
use crate::structs::{CannedAcl, ObjectLocation};
use anyhow::anyhow;
use bytes::Bytes;
use futures::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Every published artifact is world readable
pub const ARTIFACT_ACL: CannedAcl = CannedAcl::PublicRead;

/// Uploads artifacts to a bound [`UploadTarget`] and computes their URLs.
///
/// A publisher can only be built from a target returned by a successful setup:
///
/// ```compile_fail,E0451
/// use s3_publisher::destination::Destination;
/// use s3_publisher::{ArtifactPublisher, MemoryBackend, UploadTarget};
/// use std::sync::Arc;
///
/// let target = UploadTarget {
///     destination: Destination::parse("s3://my-bucket").unwrap(),
///     region: "us-east-1".parse().unwrap(),
///     public_host: "s3.amazonaws.com".to_string(),
///     backend: Arc::new(MemoryBackend::new().with_bucket("my-bucket")),
/// };
/// let publisher = ArtifactPublisher::new(target);
/// ```
#[derive(Debug, Clone)]
pub struct ArtifactPublisher {
    target: UploadTarget,
}

/// What happened to one artifact of [`ArtifactPublisher::upload_all`]
#[derive(Debug)]
pub struct UploadOutcome {
    pub path: String,
    pub url: String,
    pub result: Result<(), UploadError>,
}

impl ArtifactPublisher {
    pub fn new(target: UploadTarget) -> Self {
        ArtifactPublisher { target }
    }

    pub fn target(&self) -> &UploadTarget {
        &self.target
    }

    /// Key of the artifact inside the bucket, shared by `upload` and `url`
    pub fn remote_key(&self, artifact: &Artifact) -> String {
        self.target.destination().key_for(&artifact.path)
    }

    /// Public URL of the artifact, no I/O
    pub fn url(&self, artifact: &Artifact) -> String {
        format!(
            "http://{}.{}/{}",
            self.target.bucket(),
            self.target.public_host(),
            self.remote_key(artifact)
        )
    }

    /// Reads the whole file and writes it with a single PUT.
    /// An artifact path without any segment is rejected before the file is read.
    #[tracing::instrument(level = "trace", skip(self, artifact), fields(path = %artifact.path))]
    pub async fn upload(&self, artifact: &Artifact) -> Result<(), UploadError> {
        if path_segments(&artifact.path).next().is_none() {
            error!(path = %artifact.path, "Artifact path is empty");
            return Err(UploadError::WriteFailed {
                key: self.remote_key(artifact),
                source: anyhow!("empty object key for artifact path `{}`", artifact.path),
            });
        }

        let body = tokio::fs::read(&artifact.absolute_path)
            .await
            .map_err(|source| {
                error!(error = ?source, path = ?artifact.absolute_path, "Error reading artifact");
                UploadError::ReadFailed {
                    path: artifact.absolute_path.clone(),
                    source,
                }
            })?;

        let key = self.remote_key(artifact);
        let size = body.len();
        let location = ObjectLocation {
            bucket: self.target.bucket().to_string(),
            key: key.clone(),
        };

        self.target
            .backend()
            .put_object(location, Bytes::from(body), &artifact.mime_type, ARTIFACT_ACL)
            .await
            .map_err(|source| {
                error!(error = ?source, key = %key, "Error uploading artifact");
                UploadError::WriteFailed {
                    key: key.clone(),
                    source,
                }
            })?;

        info!(key = %key, size, content_type = %artifact.mime_type, "Uploaded artifact");
        Ok(())
    }

    /// Like [`upload`](Self::upload), but gives up as soon as `cancel` fires
    pub async fn upload_with_cancel(
        &self,
        artifact: &Artifact,
        cancel: CancellationToken,
    ) -> Result<(), UploadError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                let key = self.remote_key(artifact);
                warn!(key = %key, "Upload cancelled");
                Err(UploadError::Cancelled { key })
            }
            result = self.upload(artifact) => result,
        }
    }

    /// Uploads independent artifacts, at most `concurrency` at a time.
    /// A failed artifact does not stop the others; outcomes keep input order.
    pub async fn upload_all(
        &self,
        artifacts: &[Artifact],
        concurrency: usize,
        cancel: CancellationToken,
    ) -> Vec<UploadOutcome> {
        futures::stream::iter(artifacts)
            .map(|artifact| {
                let cancel = cancel.clone();
                async move {
                    let result = self.upload_with_cancel(artifact, cancel).await;
                    UploadOutcome {
                        path: artifact.path.clone(),
                        url: self.url(artifact),
                        result,
                    }
                }
            })
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}
