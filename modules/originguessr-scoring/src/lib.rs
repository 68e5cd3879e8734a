pub mod engine;
pub mod game;
pub mod timeline;

pub use engine::{distance_km, location_score, total_score, ScoringEngine};
pub use game::GameSummary;
pub use timeline::TimelineModel;
