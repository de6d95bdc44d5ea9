use crate::config::{BackendSettings, ConfigProvider};
use crate::data_backends::s3_backend::S3Backend;
use crate::data_backends::storage_backend::StorageBackend;
use crate::destination::Destination;
use crate::error::ConfigError;
use crate::region::Region;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Host of the public virtual-hosted style S3 URLs
pub const S3_PUBLIC_HOST: &str = "s3.amazonaws.com";

/// A destination whose bucket has been found reachable.
///
/// Only [`DestinationResolver`] can create one, so holding an `UploadTarget`
/// means setup has succeeded.
#[derive(Debug, Clone)]
pub struct UploadTarget {
    destination: Destination,
    region: Region,
    public_host: String,
    backend: Arc<dyn StorageBackend>,
}

impl UploadTarget {
    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn bucket(&self) -> &str {
        self.destination.bucket()
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn public_host(&self) -> &str {
        &self.public_host
    }

    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// Serves URLs from `{bucket}.{host}` instead of `{bucket}.s3.amazonaws.com`
    pub fn with_public_host(mut self, host: impl Into<String>) -> Self {
        self.public_host = host.into();
        self
    }
}

/// Turns destination strings into bound upload targets
pub struct DestinationResolver<C: ConfigProvider> {
    config: C,
}

impl<C: ConfigProvider> DestinationResolver<C> {
    pub fn new(config: C) -> Self {
        DestinationResolver { config }
    }

    /// Parses `destination`, resolves credentials and region, connects to S3
    /// and probes the bucket once
    #[tracing::instrument(level = "trace", skip(self))]
    pub async fn setup(&self, destination: &str) -> Result<UploadTarget, ConfigError> {
        let (destination, settings) = self.prepare(destination)?;
        let backend = S3Backend::new(&settings).await;
        bind(destination, settings.region, Arc::new(backend)).await
    }

    /// Same as [`setup`](Self::setup) but writes through `backend` instead of S3.
    /// Credentials and region are still required and validated.
    #[tracing::instrument(level = "trace", skip(self, backend))]
    pub async fn setup_with_backend(
        &self,
        destination: &str,
        backend: Arc<dyn StorageBackend>,
    ) -> Result<UploadTarget, ConfigError> {
        let (destination, settings) = self.prepare(destination)?;
        bind(destination, settings.region, backend).await
    }

    // Everything that can fail without touching the network
    fn prepare(&self, destination: &str) -> Result<(Destination, BackendSettings), ConfigError> {
        let destination = Destination::parse(destination).inspect_err(crate::logerr!())?;
        let settings = BackendSettings::from_config(&self.config)?;
        debug!(
            bucket = destination.bucket(),
            region = settings.region.name(),
            endpoint = ?settings.endpoint,
            "Resolved destination"
        );
        Ok((destination, settings))
    }
}

async fn bind(
    destination: Destination,
    region: Region,
    backend: Arc<dyn StorageBackend>,
) -> Result<UploadTarget, ConfigError> {
    if let Err(err) = backend.probe_bucket(destination.bucket()).await {
        error!(error = ?err, bucket = destination.bucket(), region = region.name(), "Bucket probe failed");
        return Err(ConfigError::BucketUnreachable {
            bucket: destination.bucket().to_string(),
            region: region.name().to_string(),
            source: err,
        });
    }

    info!(%destination, region = region.name(), "Upload target ready");
    Ok(UploadTarget {
        destination,
        region,
        public_host: S3_PUBLIC_HOST.to_string(),
        backend,
    })
}
