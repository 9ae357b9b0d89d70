pub mod export;
pub mod submission;

pub use export::{export_availability, export_session_results};
pub use submission::{
    validate_availability, validate_scores, AvailabilityRequest, DayStatus, ScoreEntry,
    ScoreRequest,
};
