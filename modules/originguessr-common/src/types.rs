use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

// --- Score bounds ---

pub const MAX_LOCATION_SCORE: u32 = 5000;
pub const MAX_YEAR_SCORE: u32 = 5000;
pub const MAX_ROUND_SCORE: u32 = MAX_LOCATION_SCORE + MAX_YEAR_SCORE;

// --- Geo Types ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Build a point, rejecting non-finite or out-of-range degrees.
    pub fn new(lat: f64, lng: f64) -> Result<Self, ScoringError> {
        let point = Self { lat, lng };
        point.validate()?;
        Ok(point)
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lng_ok = self.lng.is_finite() && (-180.0..=180.0).contains(&self.lng);
        if lat_ok && lng_ok {
            Ok(())
        } else {
            Err(ScoringError::InvalidCoordinate {
                lat: self.lat,
                lng: self.lng,
            })
        }
    }
}

/// A located, dated origin: either the artifact's true origin or a player's guess.
/// Years use astronomical numbering (negative = BC).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Placement {
    pub lat: f64,
    pub lng: f64,
    pub year: i64,
}

impl Placement {
    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Convert an untyped year (JSON number, slider value) into a timeline year.
pub fn parse_year(raw: f64) -> Result<i64, ScoringError> {
    if !raw.is_finite() || raw.fract() != 0.0 || raw.abs() > i64::MAX as f64 {
        return Err(ScoringError::InvalidYear(raw));
    }
    Ok(raw as i64)
}

// --- Scores ---

/// Score for one round. `distance_km` is `None` when the player made no guess.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreResult {
    pub distance_km: Option<f64>,
    pub location_score: u32,
    pub year_score: u32,
    pub total_score: u32,
}

impl ScoreResult {
    /// Result substituted by the caller when a round ends without a guess.
    pub fn no_guess() -> Self {
        Self {
            distance_km: None,
            location_score: 0,
            year_score: 0,
            total_score: 0,
        }
    }

    pub fn is_no_guess(&self) -> bool {
        self.distance_km.is_none()
    }

    /// Check a result that came from outside the engine, e.g. a client
    /// resubmitting its rounds for a final summary.
    pub fn validate(&self) -> Result<(), ScoringError> {
        match self.distance_km {
            Some(d) if !d.is_finite() || d < 0.0 => {
                return Err(ScoringError::InvalidDistance(d));
            }
            None if self.total_score != 0 || self.location_score != 0 || self.year_score != 0 => {
                return Err(ScoringError::InconsistentScore(
                    "round without a guess must score zero",
                ));
            }
            _ => {}
        }

        if self.location_score > MAX_LOCATION_SCORE {
            return Err(ScoringError::InconsistentScore("location score above maximum"));
        }
        if self.year_score > MAX_YEAR_SCORE {
            return Err(ScoringError::InconsistentScore("year score above maximum"));
        }
        if self.total_score != self.location_score + self.year_score {
            return Err(ScoringError::InconsistentScore(
                "total is not location plus year",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_point_accepts_bounds() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn geo_point_rejects_out_of_range_and_nan() {
        assert_eq!(
            GeoPoint::new(90.5, 0.0),
            Err(ScoringError::InvalidCoordinate { lat: 90.5, lng: 0.0 })
        );
        assert!(GeoPoint::new(0.0, -180.01).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn parse_year_accepts_integral_values() {
        assert_eq!(parse_year(1800.0), Ok(1800));
        assert_eq!(parse_year(-5_000_000.0), Ok(-5_000_000));
    }

    #[test]
    fn parse_year_rejects_fractional_and_non_finite() {
        assert!(matches!(parse_year(1800.5), Err(ScoringError::InvalidYear(_))));
        assert!(parse_year(f64::NAN).is_err());
        assert!(parse_year(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn no_guess_serializes_null_distance() {
        let json = serde_json::to_value(ScoreResult::no_guess()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "distance_km": null,
                "location_score": 0,
                "year_score": 0,
                "total_score": 0
            })
        );
        assert!(ScoreResult::no_guess().is_no_guess());
    }

    #[test]
    fn validate_accepts_engine_shaped_results() {
        assert_eq!(ScoreResult::no_guess().validate(), Ok(()));
        let scored = ScoreResult {
            distance_km: Some(343.56),
            location_score: 4155,
            year_score: 5000,
            total_score: 9155,
        };
        assert_eq!(scored.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_broken_results() {
        let base = ScoreResult {
            distance_km: Some(10.0),
            location_score: 4000,
            year_score: 4000,
            total_score: 8000,
        };

        let negative = ScoreResult { distance_km: Some(-50.0), ..base };
        assert_eq!(negative.validate(), Err(ScoringError::InvalidDistance(-50.0)));

        let nan = ScoreResult { distance_km: Some(f64::NAN), ..base };
        assert!(matches!(nan.validate(), Err(ScoringError::InvalidDistance(_))));

        let too_high = ScoreResult {
            location_score: 9999,
            year_score: 9999,
            total_score: 19_998,
            ..base
        };
        assert!(matches!(too_high.validate(), Err(ScoringError::InconsistentScore(_))));

        let bad_total = ScoreResult { total_score: 1, ..base };
        assert!(matches!(bad_total.validate(), Err(ScoringError::InconsistentScore(_))));

        let scored_miss = ScoreResult {
            distance_km: None,
            ..base
        };
        assert!(matches!(scored_miss.validate(), Err(ScoringError::InconsistentScore(_))));
    }

    #[test]
    fn max_round_score_is_sum_of_parts() {
        assert_eq!(MAX_ROUND_SCORE, 10_000);
    }
}
