use std::sync::Arc;

use async_trait::async_trait;

use dictation_domain::scoring::{longest_common_subsequence, normalize, score_attempt};
use dictation_domain::{CompletionPort, DomainError, TrackRepositoryPort};

use crate::{ApplicationError, GradeDictationRequest, GradeDictationResponse};

#[async_trait]
pub trait GradeDictationUseCase: Send + Sync {
    async fn grade(
        &self,
        request: GradeDictationRequest,
    ) -> Result<GradeDictationResponse, ApplicationError>;
}

pub struct GradeDictationUseCaseImpl {
    repository: Arc<dyn TrackRepositoryPort>,
    completions: Arc<dyn CompletionPort>,
}

impl GradeDictationUseCaseImpl {
    pub fn new(
        repository: Arc<dyn TrackRepositoryPort>,
        completions: Arc<dyn CompletionPort>,
    ) -> Self {
        Self {
            repository,
            completions,
        }
    }
}

#[async_trait]
impl GradeDictationUseCase for GradeDictationUseCaseImpl {
    async fn grade(
        &self,
        request: GradeDictationRequest,
    ) -> Result<GradeDictationResponse, ApplicationError> {
        let segment = self
            .repository
            .find_segment(request.segment_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(&format!("segment {} does not exist", request.segment_id))
            })?;

        let reference = normalize(&segment.transcript);
        let typed = normalize(&request.content);
        let matched = longest_common_subsequence(&typed, &reference);
        let scored = score_attempt(&reference, &typed, &matched);

        tracing::debug!(
            segment_id = %segment.id,
            reference_words = reference.len(),
            typed_words = typed.len(),
            matched_words = scored.matched_count,
            score = scored.score,
            "dictation attempt scored"
        );

        // First-success side effect; a marker failure never fails the grade.
        match self
            .completions
            .mark_completed(request.learner_id, request.segment_id)
            .await
        {
            Ok(true) => {
                tracing::info!(
                    learner_id = %request.learner_id,
                    segment_id = %request.segment_id,
                    "segment completion recorded"
                );
            }
            Ok(false) => {}
            Err(error) => {
                tracing::warn!(
                    learner_id = %request.learner_id,
                    segment_id = %request.segment_id,
                    error = %error,
                    "completion marker write failed"
                );
            }
        }

        Ok(GradeDictationResponse {
            segment_id: segment.id,
            transcript: segment.transcript,
            words: scored.words,
            correctness_rate: scored.correctness_rate,
            redundancy: scored.redundancy,
            redundancy_rate: scored.redundancy_rate,
            score: scored.score,
        })
    }
}
