// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod fan_score;
pub mod feedback;
pub mod tier;
pub mod user;

pub use fan_score::{FanScore, FanScoreUpdate, NewFanScore, ScoreCategory};
pub use feedback::{FeedbackOption, NewScoreFeedback, ScoreFeedback};
pub use tier::{get_user_tier, Benefit, FanScoreTier, TierConfig, TIERS};
pub use user::{NewUser, User, UserUpdate};
