// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User feedback on their fan score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// What the user thinks of their score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub enum FeedbackOption {
    TooLow,
    Accurate,
    TooHigh,
    NotSure,
}

/// Append-only feedback record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct ScoreFeedback {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub user_id: u64,
    pub feedback: FeedbackOption,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when recording feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScoreFeedback {
    pub user_id: u64,
    pub feedback: FeedbackOption,
    pub comment: Option<String>,
}

impl ScoreFeedback {
    pub fn from_new(id: u64, new: NewScoreFeedback, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new.user_id,
            feedback: new.feedback,
            comment: new.comment,
            created_at,
        }
    }
}
