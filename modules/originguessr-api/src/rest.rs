use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use schemars::schema_for;
use serde::Deserialize;
use tracing::warn;

use originguessr_common::{parse_year, Placement, ScoreResult, MAX_ROUND_SCORE};
use originguessr_scoring::GameSummary;

use crate::AppState;

// --- Request structs ---

#[derive(Deserialize)]
pub struct ClosestQuery {
    year: f64,
}

#[derive(Deserialize)]
pub struct ScoreRequest {
    actual: Placement,
    /// `None` when the round timer ran out before a guess was placed.
    guess: Option<Placement>,
}

#[derive(Deserialize)]
pub struct SummaryRequest {
    rounds: Vec<ScoreResult>,
}

// --- Helpers ---

fn unprocessable(message: String) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

/// Body extraction failures keep axum's status but use the `{"error"}` shape.
fn rejected(rejection: JsonRejection) -> Response {
    warn!(error = %rejection, "Rejected request body");
    (
        rejection.status(),
        Json(serde_json::json!({ "error": rejection.body_text() })),
    )
        .into_response()
}

// --- Handlers ---

pub async fn api_timeline(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timeline = state.engine.timeline();
    let default_index = timeline.default_index();
    Json(serde_json::json!({
        "years": timeline.years(),
        "default_index": default_index,
        "default_year": timeline.year_at(default_index),
    }))
}

pub async fn api_timeline_closest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ClosestQuery>,
) -> impl IntoResponse {
    match parse_year(params.year) {
        Ok(year) => {
            let (closest, index) = state.engine.timeline().closest_index(year);
            Json(serde_json::json!({ "year": closest, "index": index })).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Rejected timeline lookup");
            unprocessable(e.to_string())
        }
    }
}

pub async fn api_game(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "rounds_per_game": state.config.rounds_per_game,
        "round_time_limit_secs": state.config.round_time_limit_secs,
        "max_score_per_round": MAX_ROUND_SCORE,
    }))
}

pub async fn api_score(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> impl IntoResponse {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejected(rejection),
    };
    let Some(guess) = req.guess else {
        return Json(ScoreResult::no_guess()).into_response();
    };

    match state.engine.calculate_all_scores(&req.actual, &guess) {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to score guess");
            unprocessable(e.to_string())
        }
    }
}

pub async fn api_summary(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> impl IntoResponse {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejected(rejection),
    };
    match GameSummary::from_rounds(req.rounds, state.config.rounds_per_game) {
        Ok(summary) => {
            let percentage = summary.percentage();
            match serde_json::to_value(&summary) {
                Ok(mut val) => {
                    if let Some(obj) = val.as_object_mut() {
                        obj.insert("percentage".to_string(), serde_json::json!(percentage));
                    }
                    Json(val).into_response()
                }
                Err(e) => {
                    warn!(error = %e, "Failed to serialize game summary");
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            }
        }
        Err(e) => {
            warn!(error = %e, "Failed to summarize game");
            unprocessable(e.to_string())
        }
    }
}

pub async fn api_schema() -> impl IntoResponse {
    Json(serde_json::json!({
        "placement": schema_for!(Placement),
        "score_result": schema_for!(ScoreResult),
        "game_summary": schema_for!(GameSummary),
    }))
}
