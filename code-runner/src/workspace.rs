use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::Error;

/// Throwaway directory holding one submission's source file.
///
/// The directory and everything in it is removed when the workspace is
/// dropped, whichever way the run ended.
pub struct Workspace {
    dir: Option<TempDir>,
    root: PathBuf,
}

impl Workspace {
    /// Create a fresh directory under the system temp dir
    pub fn create() -> Result<Self, Error> {
        let dir = tempfile::Builder::new()
            .prefix("code")
            .tempdir()
            .map_err(Error::TempDir)?;
        let root = dir.path().to_path_buf();
        debug!("Created workspace at {}", root.display());

        Ok(Self {
            dir: Some(dir),
            root,
        })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write `code` to `file_name` inside the workspace
    pub async fn write_source(&self, file_name: &str, code: &str) -> Result<PathBuf, Error> {
        let path = self.root.join(file_name);
        fs::write(&path, code).await.map_err(Error::WriteSource)?;
        debug!("Wrote {} bytes to {}", code.len(), path.display());
        Ok(path)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            if let Err(e) = dir.close() {
                warn!(
                    "Failed to clean up workspace {}: {}",
                    self.root.display(),
                    e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_source_and_cleans_up_on_drop() -> Result<(), Error> {
        let workspace = Workspace::create()?;
        let root = workspace.path().to_path_buf();
        assert!(root.is_dir());
        assert!(root
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("code")));

        let source = workspace.write_source("main.py", "print(1)").await?;
        assert_eq!(source, root.join("main.py"));
        assert_eq!(fs::read_to_string(&source).await.unwrap(), "print(1)");

        drop(workspace);
        assert!(!root.exists());
        Ok(())
    }

    #[tokio::test]
    async fn write_into_missing_directory_is_reported() -> Result<(), Error> {
        let workspace = Workspace::create()?;
        let result = workspace.write_source("no/such/dir/main.go", "package main").await;
        assert!(matches!(result, Err(Error::WriteSource(_))));
        Ok(())
    }
}
