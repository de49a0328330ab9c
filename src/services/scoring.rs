// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fan score assignment for new accounts.
//!
//! There is no engagement signal yet: every component is drawn
//! independently, so `overall_score` is not an aggregate of the four
//! sub-scores.

use crate::models::NewFanScore;
use rand::Rng;

/// Inclusive range every generated component is drawn from.
pub const SCORE_RANGE: std::ops::RangeInclusive<i32> = 1..=100;

/// Draw a fresh score record for `user_id` from `rng`.
pub fn generate_fan_score<R: Rng + ?Sized>(user_id: u64, rng: &mut R) -> NewFanScore {
    NewFanScore {
        user_id,
        overall_score: rng.gen_range(SCORE_RANGE),
        social_interactions: rng.gen_range(SCORE_RANGE),
        event_presence: rng.gen_range(SCORE_RANGE),
        content_engagement: rng.gen_range(SCORE_RANGE),
        team_loyalty: rng.gen_range(SCORE_RANGE),
    }
}

/// [`generate_fan_score`] using the thread-local RNG.
pub fn random_fan_score(user_id: u64) -> NewFanScore {
    generate_fan_score(user_id, &mut rand::thread_rng())
}
