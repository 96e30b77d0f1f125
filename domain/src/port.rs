use async_trait::async_trait;
use uuid::Uuid;

use crate::{AudioLocator, DomainError, Extraction, Segment, TimeRange, Track};

/// Converts a compressed audio buffer into an uncompressed PCM WAV container
/// at the source's native sample rate and channel count.
#[async_trait]
pub trait AudioCodecPort: Send + Sync {
    async fn convert_to_wav(&self, audio: &[u8]) -> Result<Vec<u8>, DomainError>;
}

/// Slices an uncompressed container into one standalone clip per time range.
///
/// The whole batch is validated before any clip is produced; the first
/// invalid range fails the call.
#[async_trait]
pub trait SegmentExtractorPort: Send + Sync {
    async fn extract(&self, wav: &[u8], ranges: &[TimeRange]) -> Result<Extraction, DomainError>;
}

/// External blob storage collaborator.
#[async_trait]
pub trait AudioStoragePort: Send + Sync {
    async fn save_audio(&self, bytes: Vec<u8>) -> Result<AudioLocator, DomainError>;

    /// Returns `true` when the locator existed and was removed.
    async fn remove_audio(&self, locator: &AudioLocator) -> Result<bool, DomainError>;
}

/// External persistence collaborator for the track aggregate.
#[async_trait]
pub trait TrackRepositoryPort: Send + Sync {
    async fn name_exists(&self, topic_id: Uuid, name: &str) -> Result<bool, DomainError>;

    async fn count_in_topic(&self, topic_id: Uuid) -> Result<u64, DomainError>;

    /// Persists the track together with its segments, atomically.
    async fn insert_track(&self, track: Track) -> Result<(), DomainError>;

    async fn find_track(&self, id: Uuid) -> Result<Option<Track>, DomainError>;

    async fn find_segment(&self, id: Uuid) -> Result<Option<Segment>, DomainError>;

    async fn delete_track(&self, id: Uuid) -> Result<(), DomainError>;

    /// Renumbers the surviving tracks of a topic to a dense 1..N sequence in
    /// one batch write. Returns the number of tracks renumbered.
    async fn renumber_topic(&self, topic_id: Uuid) -> Result<u64, DomainError>;
}

/// Records that a learner finished a segment. The write is idempotent;
/// `true` means the marker was newly recorded.
#[async_trait]
pub trait CompletionPort: Send + Sync {
    async fn mark_completed(&self, learner_id: Uuid, segment_id: Uuid)
        -> Result<bool, DomainError>;
}
