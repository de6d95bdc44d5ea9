use std::fmt::Display;

/// Where an object lives in the storage service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl Display for ObjectLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// Canned access control policy attached to a written object.
/// Artifacts are always published world readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CannedAcl {
    PublicRead,
}

impl CannedAcl {
    pub fn as_str(&self) -> &'static str {
        match self {
            CannedAcl::PublicRead => "public-read",
        }
    }
}

/// An object as it was handed to the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: bytes::Bytes,
    pub content_type: String,
    pub acl: CannedAcl,
}
