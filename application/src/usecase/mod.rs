mod create_track;
mod delete_track;
mod grade_dictation;

pub use create_track::{CreateTrackUseCase, CreateTrackUseCaseImpl};
pub use delete_track::{DeleteTrackUseCase, DeleteTrackUseCaseImpl};
pub use grade_dictation::{GradeDictationUseCase, GradeDictationUseCaseImpl};
