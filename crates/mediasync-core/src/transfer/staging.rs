//! Staging and destination paths, and atomic promotion.

use std::io;
use std::path::{Path, PathBuf};

/// Staging files are hidden: `.<name>.part`.
pub const STAGING_PREFIX: &str = ".";
pub const STAGING_SUFFIX: &str = ".part";

/// Path of the hidden staging file for `name` inside `dir`.
pub fn staging_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{STAGING_PREFIX}{name}{STAGING_SUFFIX}"))
}

/// Final path of `name` inside `dir`.
pub fn destination_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

/// Atomically rename the staging file to its destination. Both paths are in
/// the same directory, so the rename never crosses filesystems.
pub async fn promote(staging: &Path, destination: &Path) -> io::Result<()> {
    tokio::fs::rename(staging, destination).await.map_err(|e| {
        io::Error::new(
            e.kind(),
            format!(
                "failed to rename {} to {}: {}",
                staging.display(),
                destination.display(),
                e
            ),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_name_is_hidden_part_file() {
        let p = staging_path(Path::new("/srv/photos"), "IMG_0001.JPG");
        assert_eq!(p, PathBuf::from("/srv/photos/.IMG_0001.JPG.part"));
        let d = destination_path(Path::new("/srv/photos"), "IMG_0001.JPG");
        assert_eq!(d, PathBuf::from("/srv/photos/IMG_0001.JPG"));
    }

    #[tokio::test]
    async fn promote_moves_file() {
        let dir = tempfile::tempdir().unwrap();
        let staging = staging_path(dir.path(), "a.jpg");
        let dest = destination_path(dir.path(), "a.jpg");
        std::fs::write(&staging, b"jpeg").unwrap();

        promote(&staging, &dest).await.unwrap();
        assert!(!staging.exists());
        assert_eq!(std::fs::read(&dest).unwrap(), b"jpeg");
    }

    #[tokio::test]
    async fn promote_missing_staging_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = promote(&dir.path().join(".x.part"), &dir.path().join("x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
