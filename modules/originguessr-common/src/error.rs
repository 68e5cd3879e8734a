use thiserror::Error;

/// Input that cannot be scored. Scoring never falls back to a plausible
/// number when one of these is raised.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ScoringError {
    #[error("Invalid coordinate: lat={lat}, lng={lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("Invalid year: {0}")]
    InvalidYear(f64),

    #[error("Invalid distance: {0} km")]
    InvalidDistance(f64),

    #[error("Inconsistent score: {0}")]
    InconsistentScore(&'static str),
}

#[derive(Error, Debug)]
pub enum OriginGuessrError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    #[error("Too many rounds: {played} played, game allows {limit}")]
    TooManyRounds { played: usize, limit: u32 },

    #[error("Invalid round {index}: {source}")]
    InvalidRound {
        index: usize,
        #[source]
        source: ScoringError,
    },

    #[error("Score total overflowed after {rounds} rounds")]
    ScoreOverflow { rounds: usize },

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
