use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque reference returned by the audio storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioLocator(String);

impl AudioLocator {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AudioLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One full audio lesson, cut into ordered sentence-level segments.
///
/// A track never exists without at least one segment; both are created
/// together by the assembly use case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Uuid,
    pub topic_id: Uuid,
    pub name: String,
    pub audio: AudioLocator,
    pub transcript: String,
    pub duration_secs: f64,
    /// 1-based ordering position within the parent topic.
    pub position: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub id: Uuid,
    pub track_id: Uuid,
    pub audio: AudioLocator,
    pub transcript: String,
    /// Unique within the owning track, 1-based.
    pub order: u32,
    pub duration_secs: f64,
}

/// Transient slicing instruction; validated as part of a batch, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_secs: f64,
    pub end_secs: f64,
    pub order: u32,
    pub transcript: String,
}

/// One standalone playable clip cut out of the source container.
#[derive(Debug, Clone)]
pub struct ExtractedClip {
    pub bytes: Vec<u8>,
    pub duration_secs: f64,
}

/// Output of slicing a container against a validated range batch.
///
/// Clips come back in input-batch order.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub clips: Vec<ExtractedClip>,
    pub total_duration_secs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordMark {
    Correct,
    MissingOrWrong,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordResult {
    pub word: String,
    pub order: u32,
    pub mark: WordMark,
}

/// Grading outcome for one dictation attempt. Computed on demand, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub segment_id: Uuid,
    pub transcript: String,
    pub words: Vec<WordResult>,
    pub correctness_rate: f64,
    pub redundancy: u32,
    pub redundancy_rate: f64,
    pub score: u32,
}
