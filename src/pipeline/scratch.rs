//! Per-request staging file handed to every tool in a run.
//!
//! Each run owns its own file, so concurrent requests never see each
//! other's intermediate artifacts. The file is deleted when the [`Scratch`]
//! is dropped, on success and on every early return.

use std::io;
use std::path::Path;
use tempfile::NamedTempFile;

const PREFIX: &str = "spirv-playground-";

#[derive(Debug)]
pub struct Scratch {
    file: NamedTempFile,
}

impl Scratch {
    /// Create a fresh scratch file in `dir`, or the system temp dir.
    pub fn create(dir: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(PREFIX);
        let file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Replace the staged contents.
    pub async fn stage(&self, contents: impl AsRef<[u8]>) -> io::Result<()> {
        tokio::fs::write(self.path(), contents).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stage_overwrites_contents() {
        let scratch = Scratch::create(None).unwrap();
        scratch.stage("first version").await.unwrap();
        scratch.stage("second").await.unwrap();

        let contents = tokio::fs::read_to_string(scratch.path()).await.unwrap();
        assert_eq!(contents, "second");
    }

    #[test]
    fn test_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = Scratch::create(Some(dir.path())).unwrap();
        let path = scratch.path().to_path_buf();
        assert!(path.exists());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(PREFIX));

        drop(scratch);
        assert!(!path.exists());
    }

    #[test]
    fn test_each_scratch_is_unique() {
        let a = Scratch::create(None).unwrap();
        let b = Scratch::create(None).unwrap();
        assert_ne!(a.path(), b.path());
    }
}
