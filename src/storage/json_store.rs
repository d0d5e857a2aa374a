//! Filesystem-backed [`FileStore`].

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use std::io::Write;
use tracing::debug;

use super::FileStore;
use super::security::validate_bare_file_name;
use crate::errors::{StoreError, StoreResult};

/// Stores collection documents in one directory and image assets in another.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    files_dir: PathBuf,
    images_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(files_dir: PathBuf, images_dir: PathBuf) -> Self {
        Self {
            files_dir,
            images_dir,
        }
    }

    pub fn files_dir(&self) -> &Path {
        &self.files_dir
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Create the documents and images directories if they are missing.
    pub async fn ensure_storage_dirs(&self) -> StoreResult<()> {
        for dir in [&self.files_dir, &self.images_dir] {
            if !dir.exists() {
                fs::create_dir_all(dir)
                    .await
                    .map_err(|source| StoreError::Write {
                        path: dir.clone(),
                        source,
                    })?;
            }
        }
        Ok(())
    }

    fn document_path(&self, name: &str) -> StoreResult<PathBuf> {
        validate_bare_file_name(name)?;
        Ok(self.files_dir.join(name))
    }

    fn asset_path(&self, filename: &str) -> StoreResult<PathBuf> {
        validate_bare_file_name(filename)?;
        Ok(self.images_dir.join(filename))
    }
}

#[async_trait]
impl FileStore for JsonFileStore {
    async fn read_document(&self, name: &str) -> StoreResult<Vec<u8>> {
        let path = self.document_path(name)?;
        fs::read(&path)
            .await
            .map_err(|source| StoreError::Read { path, source })
    }

    async fn write_document(&self, name: &str, contents: &[u8]) -> StoreResult<()> {
        let path = self.document_path(name)?;
        let files_dir = self.files_dir.clone();
        let contents = contents.to_vec();

        // Temp file in the same directory so the final rename is atomic. The
        // temp file is removed on drop if any step before `persist` fails.
        let written = tokio::task::spawn_blocking(move || -> StoreResult<(PathBuf, usize)> {
            let mut tmp = tempfile::NamedTempFile::new_in(&files_dir).map_err(|source| {
                StoreError::Write {
                    path: files_dir.clone(),
                    source,
                }
            })?;
            tmp.write_all(&contents)
                .and_then(|()| tmp.as_file().sync_all())
                .map_err(|source| StoreError::Write {
                    path: tmp.path().to_path_buf(),
                    source,
                })?;
            tmp.persist(&path).map_err(|e| StoreError::Write {
                path: path.clone(),
                source: e.error,
            })?;
            Ok((path, contents.len()))
        })
        .await
        .map_err(|e| StoreError::Write {
            path: self.files_dir.join(name),
            source: std::io::Error::other(e),
        })?;

        let (path, len) = written?;
        debug!("Wrote document {:?} ({} bytes)", path, len);
        Ok(())
    }

    async fn ensure_document(&self, name: &str, initial: &[u8]) -> StoreResult<bool> {
        let path = self.document_path(name)?;
        if path.exists() {
            return Ok(false);
        }
        self.write_document(name, initial).await?;
        Ok(true)
    }

    async fn save_asset(&self, filename: &str, contents: &[u8]) -> StoreResult<()> {
        let path = self.asset_path(filename)?;
        fs::write(&path, contents)
            .await
            .map_err(|source| StoreError::Write { path, source })
    }

    async fn delete_asset(&self, filename: &str) -> StoreResult<()> {
        let path = self.asset_path(filename)?;
        fs::remove_file(&path)
            .await
            .map_err(|source| StoreError::Remove { path, source })?;
        debug!("Deleted asset {}", filename);
        Ok(())
    }
}
