use super::storage_backend::StorageBackend;
use crate::config::BackendSettings;
use crate::structs::{CannedAcl, ObjectLocation};
use anyhow::anyhow;
use anyhow::Result;
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{
    config::{Credentials, Region},
    error::DisplayErrorContext,
    primitives::ByteStream,
    types::ObjectCannedAcl,
    Client,
};
use bytes::Bytes;
use tracing::error;

/// Storage backend talking to AWS S3 or an S3 compatible store
#[derive(Debug, Clone)]
pub struct S3Backend {
    pub s3_client: Client,
}

impl S3Backend {
    #[tracing::instrument(level = "trace", skip(settings))]
    pub async fn new(settings: &BackendSettings) -> Self {
        let credentials = Credentials::new(
            settings.credentials.access_key.clone(),
            settings.credentials.secret_key.clone(),
            settings.credentials.session_token.clone(),
            None,
            "environment",
        );

        // One attempt per request, failures go straight back to the caller
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.name()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled())
            .load()
            .await;

        let mut s3_config = aws_sdk_s3::config::Builder::from(&config);
        if let Some(endpoint) = &settings.endpoint {
            tracing::debug!("S3 Endpoint: {}", endpoint);
            s3_config = s3_config.endpoint_url(endpoint).force_path_style(true);
        }

        S3Backend {
            s3_client: Client::from_conf(s3_config.build()),
        }
    }
}

#[async_trait]
impl StorageBackend for S3Backend {
    // Lists zero keys, this fails for missing buckets and missing permissions alike
    #[tracing::instrument(level = "trace", skip(self))]
    async fn probe_bucket(&self, bucket: &str) -> Result<()> {
        match self
            .s3_client
            .list_objects_v2()
            .bucket(bucket)
            .max_keys(0)
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => {
                error!(error = ?err, "Error probing bucket");
                Err(anyhow!("{}", DisplayErrorContext(&err)))
            }
        }
    }

    #[tracing::instrument(level = "trace", skip(self, body, content_type))]
    async fn put_object(
        &self,
        location: ObjectLocation,
        body: Bytes,
        content_type: &str,
        acl: CannedAcl,
    ) -> Result<()> {
        match self
            .s3_client
            .put_object()
            .bucket(location.bucket)
            .key(location.key)
            .content_type(content_type)
            .acl(object_acl(acl))
            .body(ByteStream::from(body))
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => {
                error!(error = ?err, "Error putting object");
                Err(anyhow!("{}", DisplayErrorContext(&err)))
            }
        }
    }
}

fn object_acl(acl: CannedAcl) -> ObjectCannedAcl {
    match acl {
        CannedAcl::PublicRead => ObjectCannedAcl::PublicRead,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials as StaticCredentials;
    use crate::region::Region as KnownRegion;

    #[test]
    fn acl_mapping() {
        assert_eq!(
            object_acl(CannedAcl::PublicRead).as_str(),
            CannedAcl::PublicRead.as_str()
        );
        assert_eq!(object_acl(CannedAcl::PublicRead), ObjectCannedAcl::PublicRead);
    }

    #[tokio::test]
    async fn client_uses_settings() {
        let settings = BackendSettings {
            region: "eu-central-1".parse::<KnownRegion>().unwrap(),
            credentials: StaticCredentials {
                access_key: "AKIA".to_string(),
                secret_key: "secret".to_string(),
                session_token: None,
            },
            endpoint: Some("http://localhost:9000".to_string()),
        };
        let backend = S3Backend::new(&settings).await;
        let config = backend.s3_client.config();

        assert_eq!(config.region().map(|r| r.as_ref()), Some("eu-central-1"));
    }
}
