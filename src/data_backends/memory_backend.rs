use super::storage_backend::StorageBackend;
use crate::structs::{CannedAcl, ObjectLocation, StoredObject};
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::{DashMap, DashSet};
use percent_encoding::percent_decode_str;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use url::Url;

/// Keeps all objects in memory.
/// Used for dry runs and as a stand-in for S3 in tests; it counts every call
/// and can be told to fail or stall writes.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    buckets: DashSet<String>,
    objects: DashMap<ObjectLocation, StoredObject>,
    failing_keys: DashSet<String>,
    put_delay: Option<Duration>,
    probes: AtomicUsize,
    puts: AtomicUsize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(self, bucket: impl Into<String>) -> Self {
        self.buckets.insert(bucket.into());
        self
    }

    /// Every write sleeps this long before it is stored
    pub fn with_put_delay(mut self, delay: Duration) -> Self {
        self.put_delay = Some(delay);
        self
    }

    /// Writes to `key` fail from now on, in any bucket
    pub fn fail_puts_for(&self, key: impl Into<String>) {
        self.failing_keys.insert(key.into());
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn get_object(&self, location: &ObjectLocation) -> Option<StoredObject> {
        self.objects.get(location).map(|obj| obj.value().clone())
    }

    /// Resolves a virtual-hosted style URL (`http://{bucket}.{host}/{key}`).
    /// The key is percent-decoded the way S3 decodes request paths.
    pub fn fetch_url(&self, url: &str) -> Option<StoredObject> {
        let url = Url::parse(url).ok()?;
        let host = url.host_str()?;
        let bucket = self
            .buckets
            .iter()
            .map(|b| b.key().clone())
            .filter(|b| {
                host.strip_prefix(b.as_str())
                    .is_some_and(|rest| rest.starts_with('.'))
            })
            .max_by_key(String::len)?;
        let key = url
            .path_segments()?
            .map(|segment| {
                percent_decode_str(segment)
                    .decode_utf8()
                    .map(|decoded| decoded.into_owned())
            })
            .collect::<Result<Vec<_>, _>>()
            .ok()?
            .join("/");

        self.get_object(&ObjectLocation { bucket, key })
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    #[tracing::instrument(level = "trace", skip(self))]
    async fn probe_bucket(&self, bucket: &str) -> Result<()> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        if !self.buckets.contains(bucket) {
            bail!("NoSuchBucket: The specified bucket does not exist");
        }
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip(self, body, content_type))]
    async fn put_object(
        &self,
        location: ObjectLocation,
        body: Bytes,
        content_type: &str,
        acl: CannedAcl,
    ) -> Result<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.put_delay {
            tokio::time::sleep(delay).await;
        }

        if !self.buckets.contains(&location.bucket) {
            return Err(anyhow!("NoSuchBucket: {}", location.bucket));
        }
        if location.key.is_empty() {
            bail!("InvalidRequest: object key must not be empty");
        }
        if self.failing_keys.contains(&location.key) {
            return Err(anyhow!("InternalError: write to {} rejected", location));
        }

        self.objects.insert(
            location,
            StoredObject {
                body,
                content_type: content_type.to_string(),
                acl,
            },
        );
        Ok(())
    }
}
