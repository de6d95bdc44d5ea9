//! Publishes CI build artifacts to an S3 bucket.
//!
//! A destination such as `s3://my-bucket/builds/42` is resolved once into an
//! [`UploadTarget`]; an [`ArtifactPublisher`] then uploads artifacts below that
//! prefix and reports their public URLs.
//!
//! ```no_run
//! use s3_publisher::{Artifact, ArtifactPublisher, DestinationResolver, EnvConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let target = DestinationResolver::new(EnvConfig::with_dotenv())
//!     .setup("s3://my-bucket/builds/42")
//!     .await?;
//! let publisher = ArtifactPublisher::new(target);
//!
//! let artifact = Artifact::new("/work/logs/output.txt", "logs/output.txt");
//! publisher.upload(&artifact).await?;
//! println!("{}", publisher.url(&artifact));
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod config;
pub mod data_backends;
pub mod destination;
pub mod error;
pub mod publisher;
pub mod region;
pub mod resolver;
pub mod structs;

pub use artifact::Artifact;
pub use config::{BackendSettings, ConfigProvider, EnvConfig};
pub use data_backends::memory_backend::MemoryBackend;
pub use data_backends::s3_backend::S3Backend;
pub use data_backends::storage_backend::StorageBackend;
pub use error::{ConfigError, UploadError};
pub use publisher::{ArtifactPublisher, UploadOutcome};
pub use resolver::{DestinationResolver, UploadTarget};
