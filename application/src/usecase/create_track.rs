use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use dictation_domain::{
    AudioCodecPort, AudioLocator, AudioStoragePort, DomainError, Extraction, Segment,
    SegmentExtractorPort, TimeRange, Track, TrackRepositoryPort,
};

use crate::{ApplicationError, CreateTrackRequest, CreateTrackResponse, SegmentSummary};

#[async_trait]
pub trait CreateTrackUseCase: Send + Sync {
    async fn create_track(
        &self,
        request: CreateTrackRequest,
    ) -> Result<CreateTrackResponse, ApplicationError>;
}

/// Drives the full assembly of one track: convert the upload, validate and
/// slice the range batch, store every clip plus the original, persist the
/// aggregate.
///
/// Validation strictly precedes any storage call, and every stored locator
/// is released again if a later step fails, so an aborted request leaves
/// neither orphaned uploads nor a readable partial track.
pub struct CreateTrackUseCaseImpl {
    codec: Arc<dyn AudioCodecPort>,
    extractor: Arc<dyn SegmentExtractorPort>,
    storage: Arc<dyn AudioStoragePort>,
    repository: Arc<dyn TrackRepositoryPort>,
}

impl CreateTrackUseCaseImpl {
    pub fn new(
        codec: Arc<dyn AudioCodecPort>,
        extractor: Arc<dyn SegmentExtractorPort>,
        storage: Arc<dyn AudioStoragePort>,
        repository: Arc<dyn TrackRepositoryPort>,
    ) -> Self {
        Self {
            codec,
            extractor,
            storage,
            repository,
        }
    }

    async fn store_and_persist(
        &self,
        request: CreateTrackRequest,
        extraction: Extraction,
        ranges: Vec<TimeRange>,
        stored: &mut Vec<AudioLocator>,
    ) -> Result<CreateTrackResponse, ApplicationError> {
        let track_id = Uuid::new_v4();
        let mut segments = Vec::with_capacity(extraction.clips.len());
        for (clip, range) in extraction.clips.into_iter().zip(ranges) {
            let locator = self.storage.save_audio(clip.bytes).await?;
            stored.push(locator.clone());
            segments.push(Segment {
                id: Uuid::new_v4(),
                track_id,
                audio: locator,
                transcript: range.transcript,
                order: range.order,
                duration_secs: clip.duration_secs,
            });
        }

        let full_audio = self.storage.save_audio(request.audio).await?;
        stored.push(full_audio.clone());

        let position = self.repository.count_in_topic(request.topic_id).await? as u32 + 1;
        let now = Utc::now();
        let track = Track {
            id: track_id,
            topic_id: request.topic_id,
            name: request.name,
            audio: full_audio,
            transcript: request.transcript,
            duration_secs: extraction.total_duration_secs,
            position,
            created_at: now,
            updated_at: now,
            segments,
        };
        let response = CreateTrackResponse {
            track_id,
            name: track.name.clone(),
            position,
            duration_secs: track.duration_secs,
            audio: track.audio.clone(),
            segments: track
                .segments
                .iter()
                .map(|segment| SegmentSummary {
                    segment_id: segment.id,
                    order: segment.order,
                    duration_secs: segment.duration_secs,
                    audio: segment.audio.clone(),
                })
                .collect(),
        };
        self.repository.insert_track(track).await?;
        Ok(response)
    }

    /// Best-effort compensation for uploads that already happened before a
    /// later step failed.
    async fn release_stored(&self, stored: &[AudioLocator]) {
        for locator in stored {
            if let Err(error) = self.storage.remove_audio(locator).await {
                tracing::warn!(
                    locator = %locator,
                    error = %error,
                    "failed to remove orphaned audio during rollback"
                );
            }
        }
    }
}

#[async_trait]
impl CreateTrackUseCase for CreateTrackUseCaseImpl {
    async fn create_track(
        &self,
        request: CreateTrackRequest,
    ) -> Result<CreateTrackResponse, ApplicationError> {
        tracing::debug!(
            topic_id = %request.topic_id,
            name = %request.name,
            segment_count = request.segments.len(),
            audio_bytes = request.audio.len(),
            "starting track assembly"
        );

        if request.audio.is_empty() {
            return Err(ApplicationError::Validation(
                "audio upload is empty".to_string(),
            ));
        }
        if request.segments.is_empty() {
            return Err(ApplicationError::Validation(
                "segment batch must contain at least one range".to_string(),
            ));
        }
        if self
            .repository
            .name_exists(request.topic_id, &request.name)
            .await?
        {
            return Err(DomainError::conflict(&format!(
                "track name `{}` already exists in topic",
                request.name
            ))
            .into());
        }

        let wav = self.codec.convert_to_wav(&request.audio).await?;

        let ranges: Vec<TimeRange> = request
            .segments
            .iter()
            .map(|spec| TimeRange {
                start_secs: spec.start_secs,
                end_secs: spec.end_secs,
                order: spec.order,
                transcript: spec.transcript.clone(),
            })
            .collect();
        // Fails on the first bad range, before anything is uploaded.
        let extraction = self.extractor.extract(&wav, &ranges).await?;

        let mut stored = Vec::with_capacity(ranges.len() + 1);
        match self
            .store_and_persist(request, extraction, ranges, &mut stored)
            .await
        {
            Ok(response) => {
                tracing::info!(
                    track_id = %response.track_id,
                    position = response.position,
                    segment_count = response.segments.len(),
                    duration_secs = response.duration_secs,
                    "track assembly completed"
                );
                Ok(response)
            }
            Err(error) => {
                self.release_stored(&stored).await;
                Err(error)
            }
        }
    }
}
