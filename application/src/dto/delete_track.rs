use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct DeleteTrackResponse {
    pub track_id: Uuid,
    /// Siblings whose position changed during the batch renumbering.
    pub renumbered_siblings: u64,
}
