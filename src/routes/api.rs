// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for fan scores, tiers and feedback.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{
    get_user_tier, Benefit, FanScore, FeedbackOption, NewScoreFeedback, ScoreCategory,
    ScoreFeedback, TierConfig, TIERS,
};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Longest accepted feedback comment, in characters.
pub const MAX_COMMENT_LEN: u64 = 1000;

/// API routes (require authentication via session).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/fan-score", get(get_fan_score))
        .route("/api/feedback", get(list_feedback).post(create_feedback))
}

/// API routes that need no session.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/tiers", get(list_tiers))
}

// ─── Tiers ───────────────────────────────────────────────────

/// A tier together with its benefits.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct TierResponse {
    #[serde(flatten)]
    pub config: TierConfig,
    pub benefits: Vec<Benefit>,
}

impl From<&'static TierConfig> for TierResponse {
    fn from(config: &'static TierConfig) -> Self {
        Self {
            config: *config,
            benefits: config.benefits().to_vec(),
        }
    }
}

/// The full tier table, highest tier first.
async fn list_tiers() -> Json<Vec<TierResponse>> {
    Json(TIERS.iter().map(TierResponse::from).collect())
}

// ─── Fan Score ───────────────────────────────────────────────

/// The caller's score with its derived tier and category breakdown.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct FanScoreResponse {
    #[serde(flatten)]
    pub score: FanScore,
    pub tier: TierResponse,
    pub categories: Vec<ScoreCategory>,
}

async fn get_fan_score(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<FanScoreResponse>> {
    let score = state
        .db
        .get_fan_score(user.id())
        .ok_or_else(|| AppError::NotFound("Fan score not found".to_string()))?;

    let tier = TierResponse::from(get_user_tier(score.overall_score));
    let categories = score.categories();

    Ok(Json(FanScoreResponse {
        score,
        tier,
        categories,
    }))
}

// ─── Feedback ────────────────────────────────────────────────

/// Feedback submission body.
#[derive(Debug, Deserialize, Validate)]
pub struct FeedbackRequest {
    pub feedback: FeedbackOption,
    #[validate(length(max = MAX_COMMENT_LEN))]
    #[serde(default)]
    pub comment: Option<String>,
}

async fn create_feedback(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ScoreFeedback>)> {
    let Json(request) = payload.map_err(|e| {
        tracing::debug!(error = %e.body_text(), "Rejected feedback payload");
        AppError::BadRequest("Invalid feedback data".to_string())
    })?;
    request
        .validate()
        .map_err(|e| AppError::BadRequest(format!("Invalid feedback data: {}", e)))?;

    // Blank comments are stored as absent.
    let comment = request
        .comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let feedback = state.db.create_score_feedback(NewScoreFeedback {
        user_id: user.id(),
        feedback: request.feedback,
        comment,
    });

    tracing::info!(
        user_id = feedback.user_id,
        feedback_id = feedback.id,
        option = ?feedback.feedback,
        "Score feedback recorded"
    );

    Ok((StatusCode::CREATED, Json(feedback)))
}

async fn list_feedback(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<Vec<ScoreFeedback>> {
    Json(state.db.get_score_feedback_by_user_id(user.id()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_request_comment_too_long() {
        let request = FeedbackRequest {
            feedback: FeedbackOption::TooLow,
            comment: Some("x".repeat(MAX_COMMENT_LEN as usize + 1)),
        };
        assert!(request.validate().is_err());

        let request = FeedbackRequest {
            feedback: FeedbackOption::TooLow,
            comment: Some("x".repeat(MAX_COMMENT_LEN as usize)),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_feedback_request_without_comment() {
        let request: FeedbackRequest = serde_json::from_str(r#"{"feedback":"accurate"}"#).unwrap();
        assert_eq!(request.feedback, FeedbackOption::Accurate);
        assert!(request.comment.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_tier_response_flattens_config() {
        let json = serde_json::to_value(TierResponse::from(get_user_tier(85))).unwrap();
        assert_eq!(json["title"], "Pantera Alfa");
        assert_eq!(json["maxScore"], 100);
        assert_eq!(json["benefits"].as_array().unwrap().len(), 3);
    }
}
