use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use dictation_domain::{AudioStoragePort, DomainError, TrackRepositoryPort};

use crate::{ApplicationError, DeleteTrackResponse};

#[async_trait]
pub trait DeleteTrackUseCase: Send + Sync {
    async fn delete_track(&self, track_id: Uuid) -> Result<DeleteTrackResponse, ApplicationError>;
}

/// Removes a track with its segments, releases the stored audio and closes
/// the position gap with one batch renumbering call.
pub struct DeleteTrackUseCaseImpl {
    storage: Arc<dyn AudioStoragePort>,
    repository: Arc<dyn TrackRepositoryPort>,
}

impl DeleteTrackUseCaseImpl {
    pub fn new(storage: Arc<dyn AudioStoragePort>, repository: Arc<dyn TrackRepositoryPort>) -> Self {
        Self {
            storage,
            repository,
        }
    }
}

#[async_trait]
impl DeleteTrackUseCase for DeleteTrackUseCaseImpl {
    async fn delete_track(&self, track_id: Uuid) -> Result<DeleteTrackResponse, ApplicationError> {
        let track = self
            .repository
            .find_track(track_id)
            .await?
            .ok_or_else(|| DomainError::not_found(&format!("track {track_id} does not exist")))?;

        // Record first: once the aggregate is gone no reader can reach the
        // audio, and blob removal below may stay best-effort.
        self.repository.delete_track(track_id).await?;

        let mut locators = vec![track.audio.clone()];
        locators.extend(track.segments.iter().map(|segment| segment.audio.clone()));
        for locator in &locators {
            if let Err(error) = self.storage.remove_audio(locator).await {
                tracing::warn!(
                    locator = %locator,
                    error = %error,
                    "failed to remove audio of deleted track"
                );
            }
        }

        let renumbered_siblings = self.repository.renumber_topic(track.topic_id).await?;

        tracing::info!(
            track_id = %track_id,
            topic_id = %track.topic_id,
            renumbered_siblings,
            "track deleted"
        );

        Ok(DeleteTrackResponse {
            track_id,
            renumbered_siblings,
        })
    }
}
