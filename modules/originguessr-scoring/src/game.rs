use originguessr_common::{OriginGuessrError, ScoreResult, MAX_ROUND_SCORE};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Final tally for a multi-round game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GameSummary {
    pub rounds: Vec<ScoreResult>,
    pub rounds_played: usize,
    /// Rounds that ended without a guess.
    pub rounds_missed: usize,
    pub total_score: u32,
    pub max_possible_score: u32,
    /// Mean distance over rounds that had a guess.
    pub average_distance_km: Option<f64>,
}

impl GameSummary {
    pub fn from_rounds(
        rounds: Vec<ScoreResult>,
        rounds_per_game: u32,
    ) -> Result<Self, OriginGuessrError> {
        if rounds.len() > rounds_per_game as usize {
            return Err(OriginGuessrError::TooManyRounds {
                played: rounds.len(),
                limit: rounds_per_game,
            });
        }

        for (index, round) in rounds.iter().enumerate() {
            round
                .validate()
                .map_err(|source| OriginGuessrError::InvalidRound { index, source })?;
        }

        let total_score = rounds
            .iter()
            .try_fold(0u32, |acc, r| acc.checked_add(r.total_score))
            .ok_or(OriginGuessrError::ScoreOverflow {
                rounds: rounds.len(),
            })?;
        let distances: Vec<f64> = rounds.iter().filter_map(|r| r.distance_km).collect();
        let average_distance_km = if distances.is_empty() {
            None
        } else {
            Some(distances.iter().sum::<f64>() / distances.len() as f64)
        };

        Ok(Self {
            rounds_played: rounds.len(),
            rounds_missed: rounds.len() - distances.len(),
            total_score,
            max_possible_score: rounds_per_game.saturating_mul(MAX_ROUND_SCORE),
            average_distance_km,
            rounds,
        })
    }

    /// Share of the maximum possible score, 0.0–100.0.
    pub fn percentage(&self) -> f64 {
        if self.max_possible_score == 0 {
            return 0.0;
        }
        self.total_score as f64 * 100.0 / self.max_possible_score as f64
    }
}
