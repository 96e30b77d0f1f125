//! In-memory reference adapter for the repository and completion ports.
//!
//! Durable persistence is an external collaborator in this system; this
//! adapter gives the composed service and the test suites real port
//! semantics (atomic insert, batch renumbering, idempotent completion
//! markers) without a database.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use dictation_domain::{
    CompletionPort, DomainError, Segment, Track, TrackRepositoryPort,
};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct State {
    tracks: HashMap<Uuid, Track>,
    completions: HashSet<(Uuid, Uuid)>,
}

#[derive(Default)]
pub struct InMemoryTrackRepository {
    state: RwLock<State>,
}

impl InMemoryTrackRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn completion_count(&self) -> usize {
        self.state.read().await.completions.len()
    }
}

#[async_trait]
impl TrackRepositoryPort for InMemoryTrackRepository {
    async fn name_exists(&self, topic_id: Uuid, name: &str) -> Result<bool, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .tracks
            .values()
            .any(|track| track.topic_id == topic_id && track.name == name))
    }

    async fn count_in_topic(&self, topic_id: Uuid) -> Result<u64, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .tracks
            .values()
            .filter(|track| track.topic_id == topic_id)
            .count() as u64)
    }

    async fn insert_track(&self, track: Track) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        // Mirrors the unique (topic, name) index a durable store would hold.
        if state
            .tracks
            .values()
            .any(|existing| existing.topic_id == track.topic_id && existing.name == track.name)
        {
            return Err(DomainError::conflict(&format!(
                "track name `{}` already exists in topic",
                track.name
            )));
        }
        state.tracks.insert(track.id, track);
        Ok(())
    }

    async fn find_track(&self, id: Uuid) -> Result<Option<Track>, DomainError> {
        let state = self.state.read().await;
        Ok(state.tracks.get(&id).cloned())
    }

    async fn find_segment(&self, id: Uuid) -> Result<Option<Segment>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .tracks
            .values()
            .flat_map(|track| track.segments.iter())
            .find(|segment| segment.id == id)
            .cloned())
    }

    async fn delete_track(&self, id: Uuid) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state
            .tracks
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(&format!("track {id} does not exist")))
    }

    async fn renumber_topic(&self, topic_id: Uuid) -> Result<u64, DomainError> {
        // One write lock covers the whole renumbering pass, the in-memory
        // stand-in for a single-statement batch update.
        let mut state = self.state.write().await;
        let mut siblings: Vec<&mut Track> = state
            .tracks
            .values_mut()
            .filter(|track| track.topic_id == topic_id)
            .collect();
        siblings.sort_by_key(|track| track.position);

        let mut renumbered = 0u64;
        for (index, track) in siblings.into_iter().enumerate() {
            let position = index as u32 + 1;
            if track.position != position {
                track.position = position;
                renumbered += 1;
            }
        }

        tracing::debug!(topic_id = %topic_id, renumbered, "topic positions renumbered");
        Ok(renumbered)
    }
}

#[async_trait]
impl CompletionPort for InMemoryTrackRepository {
    async fn mark_completed(
        &self,
        learner_id: Uuid,
        segment_id: Uuid,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        Ok(state.completions.insert((learner_id, segment_id)))
    }
}
