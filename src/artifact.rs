use std::path::{Path, PathBuf};

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// A build-produced file to publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Where the file lives on the local machine
    pub absolute_path: PathBuf,
    /// Path under the destination prefix, `/` separated
    pub path: String,
    pub mime_type: String,
}

impl Artifact {
    /// Creates an artifact, guessing the MIME type from the file extension
    pub fn new(absolute_path: impl Into<PathBuf>, path: impl Into<String>) -> Self {
        let path = path.into();
        let mime_type = guess_mime_type(&path);
        Artifact {
            absolute_path: absolute_path.into(),
            path,
            mime_type,
        }
    }

    /// Creates an artifact for `path` below the local directory `root`
    pub fn from_root(root: &Path, path: impl Into<String>) -> Self {
        let path = path.into();
        let absolute_path = root.join(&path);
        Artifact::new(absolute_path, path)
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }
}

pub fn guess_mime_type(path: &str) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(DEFAULT_MIME_TYPE)
        .to_string()
}
