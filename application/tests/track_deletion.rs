use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use dictation_application::{DeleteTrackUseCase, DeleteTrackUseCaseImpl};
use dictation_domain::{
    AudioLocator, AudioStoragePort, DomainError, Segment, Track, TrackRepositoryPort,
};
use dictation_infra_repository::InMemoryTrackRepository;

#[derive(Default)]
struct RecordingStorage {
    removed: Mutex<Vec<AudioLocator>>,
}

impl RecordingStorage {
    fn removed(&self) -> Vec<AudioLocator> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioStoragePort for RecordingStorage {
    async fn save_audio(&self, _bytes: Vec<u8>) -> Result<AudioLocator, DomainError> {
        Ok(AudioLocator::new(format!("{}.wav", Uuid::new_v4())))
    }

    async fn remove_audio(&self, locator: &AudioLocator) -> Result<bool, DomainError> {
        self.removed.lock().unwrap().push(locator.clone());
        Ok(true)
    }
}

fn track(topic_id: Uuid, name: &str, position: u32) -> Track {
    let id = Uuid::new_v4();
    let now = Utc::now();
    Track {
        id,
        topic_id,
        name: name.to_string(),
        audio: AudioLocator::new(format!("{name}-full.wav")),
        transcript: "transcript".to_string(),
        duration_secs: 8.0,
        position,
        created_at: now,
        updated_at: now,
        segments: vec![Segment {
            id: Uuid::new_v4(),
            track_id: id,
            audio: AudioLocator::new(format!("{name}-clip.wav")),
            transcript: "sentence".to_string(),
            order: 1,
            duration_secs: 8.0,
        }],
    }
}

#[tokio::test]
async fn deletion_releases_audio_and_renumbers_siblings() {
    let repository = Arc::new(InMemoryTrackRepository::new());
    let storage = Arc::new(RecordingStorage::default());
    let topic_id = Uuid::new_v4();

    let doomed = track(topic_id, "b", 2);
    let doomed_id = doomed.id;
    for t in [track(topic_id, "a", 1), doomed, track(topic_id, "c", 3)] {
        repository.insert_track(t).await.expect("seed");
    }

    let usecase = DeleteTrackUseCaseImpl::new(storage.clone(), repository.clone());
    let response = usecase.delete_track(doomed_id).await.expect("delete");

    assert_eq!(response.renumbered_siblings, 1);
    assert!(repository
        .find_track(doomed_id)
        .await
        .expect("lookup")
        .is_none());

    let removed = storage.removed();
    assert!(removed.contains(&AudioLocator::new("b-full.wav")));
    assert!(removed.contains(&AudioLocator::new("b-clip.wav")));
}

#[tokio::test]
async fn deleting_unknown_track_is_not_found() {
    let repository = Arc::new(InMemoryTrackRepository::new());
    let storage = Arc::new(RecordingStorage::default());
    let usecase = DeleteTrackUseCaseImpl::new(storage.clone(), repository);

    let error = usecase
        .delete_track(Uuid::new_v4())
        .await
        .expect_err("must fail");

    assert_eq!(error.code(), "not_found");
    assert!(storage.removed().is_empty());
}
