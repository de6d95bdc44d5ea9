use s3_publisher::Artifact;
use std::path::Path;

/// Writes `content` below `root` and returns the matching artifact
#[allow(dead_code)]
pub fn write_artifact(root: &Path, path: &str, content: &[u8]) -> Artifact {
    let artifact = Artifact::from_root(root, path);
    if let Some(parent) = artifact.absolute_path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&artifact.absolute_path, content).unwrap();
    artifact
}
