use crate::storage::{StorageError, StorageResult};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

/// Idempotent writer for captured artifacts
///
/// The store owns the output root and the claimed-paths set. Claiming is
/// the sole cross-request deduplication mechanism: the first caller to
/// claim a normalized path wins, and later duplicate exchanges to the same
/// path are suppressed. Writes to distinct paths may run concurrently.
pub struct ResourceStore {
    root: PathBuf,
    claimed: Mutex<HashSet<String>>,
}

impl ResourceStore {
    /// Creates a store rooted at the given output directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            claimed: Mutex::new(HashSet::new()),
        }
    }

    /// The output root all relative paths resolve under
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Atomically claims a normalized path for the current run
    ///
    /// Returns true if the caller is the first claimer and should go on to
    /// write the artifact; false if the path was already claimed. The
    /// check-and-set happens under one lock so two exchanges for the same
    /// asset can never both pass.
    pub fn claim(&self, path: &str) -> bool {
        let mut claimed = self.claimed.lock().unwrap_or_else(|e| e.into_inner());
        claimed.insert(path.to_string())
    }

    /// Number of paths claimed so far
    pub fn claimed_count(&self) -> usize {
        let claimed = self.claimed.lock().unwrap_or_else(|e| e.into_inner());
        claimed.len()
    }

    /// Writes bytes at a relative path, creating missing parent directories
    ///
    /// Overwrites any existing file at that path. Absolute paths and paths
    /// escaping the root via `..` are rejected.
    pub async fn write(&self, rel_path: &str, bytes: &[u8]) -> StorageResult<()> {
        let full = self.resolve(rel_path)?;

        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full, bytes).await?;
        Ok(())
    }

    /// Writes UTF-8 text at a relative path
    pub async fn write_text(&self, rel_path: &str, text: &str) -> StorageResult<()> {
        self.write(rel_path, text.as_bytes()).await
    }

    /// Resolves a relative path under the root, refusing escapes
    fn resolve(&self, rel_path: &str) -> StorageResult<PathBuf> {
        let rel = Path::new(rel_path);

        if rel.is_absolute() {
            return Err(StorageError::UnsafePath(rel_path.to_string()));
        }

        for component in rel.components() {
            if matches!(component, Component::ParentDir) {
                return Err(StorageError::UnsafePath(rel_path.to_string()));
            }
        }

        Ok(self.root.join(rel))
    }
}
