use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use dictation_domain::WordResult;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GradeDictationRequest {
    pub segment_id: Uuid,
    pub learner_id: Uuid,
    /// The typed attempt. An empty attempt is legal and grades to zero.
    #[validate(length(max = 10_000))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeDictationResponse {
    pub segment_id: Uuid,
    pub transcript: String,
    pub words: Vec<WordResult>,
    pub correctness_rate: f64,
    pub redundancy: u32,
    pub redundancy_rate: f64,
    pub score: u32,
}
