//! Round scoring: location from great-circle distance, year from timeline steps.

use std::sync::Arc;

use originguessr_common::{
    distance_between, GeoPoint, Placement, ScoreResult, ScoringError, MAX_LOCATION_SCORE,
    MAX_YEAR_SCORE,
};
use tracing::debug;

use crate::timeline::TimelineModel;

/// Guesses within this many kilometers earn the full location score.
const FULL_CREDIT_RADIUS_KM: f64 = 0.1;
/// Distance over which the location score falls by a factor of e.
const LOCATION_DECAY_KM: f64 = 1856.0;
/// Timeline steps over which the year score falls by a factor of e.
const YEAR_DECAY_STEPS: f64 = 50.0;
/// Ceiling for any year guess that is not an exact or adjacent hit.
const YEAR_PARTIAL_MAX: f64 = 4999.0;

/// Location score for a guess `distance_km` away from the true origin.
pub fn location_score(distance_km: f64) -> Result<u32, ScoringError> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(ScoringError::InvalidDistance(distance_km));
    }
    if distance_km <= FULL_CREDIT_RADIUS_KM {
        return Ok(MAX_LOCATION_SCORE);
    }

    let raw = MAX_LOCATION_SCORE as f64
        * (-(distance_km - FULL_CREDIT_RADIUS_KM) / LOCATION_DECAY_KM).exp();
    Ok(raw.round().max(0.0) as u32)
}

pub fn total_score(location_score: u32, year_score: u32) -> u32 {
    location_score + year_score
}

/// Validated Haversine distance in kilometers between two lat/lng pairs.
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> Result<f64, ScoringError> {
    distance_between(GeoPoint { lat: lat1, lng: lng1 }, GeoPoint { lat: lat2, lng: lng2 })
}

/// Scores guesses against a shared, prebuilt timeline.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    timeline: Arc<TimelineModel>,
}

impl ScoringEngine {
    pub fn new(timeline: Arc<TimelineModel>) -> Self {
        Self { timeline }
    }

    pub fn timeline(&self) -> &TimelineModel {
        &self.timeline
    }

    /// True when `correct_year` falls inside the window around the guess that
    /// spans half a step to either side of the guess's nearest entry.
    ///
    /// At the first and last entries the missing neighbor is replaced by the
    /// entry itself, so the window has zero width on that side.
    pub fn is_adjacent_increment(&self, correct_year: i64, guessed_year: i64) -> bool {
        let (nearest, index) = self.timeline.closest_index(guessed_year);
        // `index` comes from `closest_index`, so it is always in range.
        let (prev, next) = self.timeline.neighbors(index).unwrap_or((nearest, nearest));

        let guessed = guessed_year as f64;
        let lower = guessed - (nearest - prev) as f64 / 2.0;
        let upper = guessed + (next - nearest) as f64 / 2.0;

        let correct = correct_year as f64;
        lower <= correct && correct <= upper
    }

    pub fn year_score(&self, correct_year: i64, guessed_year: i64) -> u32 {
        if correct_year == guessed_year || self.is_adjacent_increment(correct_year, guessed_year) {
            return MAX_YEAR_SCORE;
        }

        let (_, guessed_index) = self.timeline.closest_index(guessed_year);
        let (_, correct_index) = self.timeline.closest_index(correct_year);
        let increments_away = correct_index.abs_diff(guessed_index) as f64;

        let raw = YEAR_PARTIAL_MAX * (-increments_away / YEAR_DECAY_STEPS).exp();
        raw.round().max(0.0) as u32
    }

    pub fn calculate_all_scores(
        &self,
        correct: &Placement,
        guess: &Placement,
    ) -> Result<ScoreResult, ScoringError> {
        let distance = distance_between(correct.point(), guess.point())?;
        let location = location_score(distance)?;
        let year = self.year_score(correct.year, guess.year);
        let total = total_score(location, year);

        debug!(
            distance_km = distance,
            location_score = location,
            year_score = year,
            total_score = total,
            "Scored guess"
        );

        Ok(ScoreResult {
            distance_km: Some(distance),
            location_score: location,
            year_score: year,
            total_score: total,
        })
    }

    /// Score a round that may have ended without a guess. A missing guess
    /// yields [`ScoreResult::no_guess`] without running any scoring.
    pub fn score_round(
        &self,
        actual: &Placement,
        guess: Option<&Placement>,
    ) -> Result<ScoreResult, ScoringError> {
        match guess {
            Some(guess) => self.calculate_all_scores(actual, guess),
            None => {
                debug!("Round ended without a guess");
                Ok(ScoreResult::no_guess())
            }
        }
    }
}
