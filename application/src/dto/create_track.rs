use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use dictation_domain::AudioLocator;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTrackRequest {
    pub topic_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1))]
    pub transcript: String,
    /// Full compressed upload, buffered by the transport layer.
    #[validate(length(min = 1))]
    pub audio: Vec<u8>,
    #[validate(length(min = 1), nested)]
    pub segments: Vec<SegmentSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SegmentSpec {
    #[validate(length(min = 1))]
    pub transcript: String,
    #[validate(range(min = 1))]
    pub order: u32,
    #[validate(range(min = 0.0))]
    pub start_secs: f64,
    pub end_secs: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateTrackResponse {
    pub track_id: Uuid,
    pub name: String,
    pub position: u32,
    pub duration_secs: f64,
    pub audio: AudioLocator,
    pub segments: Vec<SegmentSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentSummary {
    pub segment_id: Uuid,
    pub order: u32,
    pub duration_secs: f64,
    pub audio: AudioLocator,
}
