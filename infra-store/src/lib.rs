//! Filesystem-backed audio storage adapter.
//!
//! The production deployment hides object storage behind the same port;
//! this adapter keeps locators opaque (uuid object names) so callers never
//! learn where bytes live.

use std::path::PathBuf;

use async_trait::async_trait;
use dictation_domain::{AudioLocator, AudioStoragePort, DomainError};
use uuid::Uuid;

pub struct FsAudioStorage {
    root: PathBuf,
}

impl FsAudioStorage {
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await.map_err(|err| {
            DomainError::storage(&format!(
                "cannot prepare storage root `{}`: {err}",
                root.display()
            ))
        })?;
        Ok(Self { root })
    }

    fn path_for(&self, locator: &AudioLocator) -> PathBuf {
        self.root.join(locator.as_str())
    }
}

#[async_trait]
impl AudioStoragePort for FsAudioStorage {
    async fn save_audio(&self, bytes: Vec<u8>) -> Result<AudioLocator, DomainError> {
        let locator = AudioLocator::new(format!("{}.wav", Uuid::new_v4()));
        let path = self.path_for(&locator);
        let byte_count = bytes.len();

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|err| DomainError::storage(&format!("failed to write audio object: {err}")))?;

        tracing::debug!(locator = %locator, bytes = byte_count, "audio object stored");
        Ok(locator)
    }

    async fn remove_audio(&self, locator: &AudioLocator) -> Result<bool, DomainError> {
        match tokio::fs::remove_file(self.path_for(locator)).await {
            Ok(()) => {
                tracing::debug!(locator = %locator, "audio object removed");
                Ok(true)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(DomainError::storage(&format!(
                "failed to remove audio object `{locator}`: {err}"
            ))),
        }
    }
}
