use crate::structs::{CannedAcl, ObjectLocation};
use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::fmt::Debug;

/// The two storage operations the publisher needs
/// Errors are returned as-is, callers attach bucket/key context
#[async_trait]
pub trait StorageBackend: Debug + Send + Sync {
    /// Cheap read-only call that succeeds only if the bucket exists and is reachable
    /// # Arguments
    ///
    /// * `bucket` - Name of the bucket to check
    async fn probe_bucket(&self, bucket: &str) -> Result<()>;

    /// Writes the whole object in a single request
    /// # Arguments
    ///
    /// * `location` - Bucket and key of the object
    /// * `body` - Complete content of the object
    /// * `content_type` - MIME type stored as object metadata
    /// * `acl` - Access policy of the new object
    async fn put_object(
        &self,
        location: ObjectLocation,
        body: Bytes,
        content_type: &str,
        acl: CannedAcl,
    ) -> Result<()>;
}
