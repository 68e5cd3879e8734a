pub mod types;
pub mod geo;
pub mod config;
pub mod error;

pub use types::*;
pub use geo::*;
pub use config::Config;
pub use error::{OriginGuessrError, ScoringError};
