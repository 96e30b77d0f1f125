use std::sync::Arc;

use dictation_application::{CreateTrackUseCase, DeleteTrackUseCase, GradeDictationUseCase};

#[derive(Clone)]
pub struct AppState {
    pub create_track: Arc<dyn CreateTrackUseCase>,
    pub grade_dictation: Arc<dyn GradeDictationUseCase>,
    pub delete_track: Arc<dyn DeleteTrackUseCase>,
}

impl AppState {
    pub fn new(
        create_track: Arc<dyn CreateTrackUseCase>,
        grade_dictation: Arc<dyn GradeDictationUseCase>,
        delete_track: Arc<dyn DeleteTrackUseCase>,
    ) -> Self {
        Self {
            create_track,
            grade_dictation,
            delete_track,
        }
    }
}
