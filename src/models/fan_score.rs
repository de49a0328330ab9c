// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fan score records and their display categories.

use chrono::{DateTime, Utc};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Upper bound used when rendering sub-score progress bars.
pub const CATEGORY_MAX: i32 = 100;

/// Five-number engagement record, one per user.
///
/// `overall_score` is stored alongside the sub-scores rather than derived
/// from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct FanScore {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub user_id: u64,
    pub overall_score: i32,
    pub social_interactions: i32,
    pub event_presence: i32,
    pub content_engagement: i32,
    pub team_loyalty: i32,
    pub last_updated: DateTime<Utc>,
}

/// Fields supplied when creating a score. The store assigns `id` and
/// `last_updated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFanScore {
    pub user_id: u64,
    pub overall_score: i32,
    pub social_interactions: i32,
    pub event_presence: i32,
    pub content_engagement: i32,
    pub team_loyalty: i32,
}

/// Partial update merged onto an existing score.
#[derive(Debug, Clone, Default)]
pub struct FanScoreUpdate {
    pub overall_score: Option<i32>,
    pub social_interactions: Option<i32>,
    pub event_presence: Option<i32>,
    pub content_engagement: Option<i32>,
    pub team_loyalty: Option<i32>,
}

impl FanScore {
    pub fn from_new(id: u64, new: NewFanScore, last_updated: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new.user_id,
            overall_score: new.overall_score,
            social_interactions: new.social_interactions,
            event_presence: new.event_presence,
            content_engagement: new.content_engagement,
            team_loyalty: new.team_loyalty,
            last_updated,
        }
    }

    /// Merge present fields and stamp `last_updated`.
    pub fn apply(&mut self, update: FanScoreUpdate, last_updated: DateTime<Utc>) {
        if let Some(v) = update.overall_score {
            self.overall_score = v;
        }
        if let Some(v) = update.social_interactions {
            self.social_interactions = v;
        }
        if let Some(v) = update.event_presence {
            self.event_presence = v;
        }
        if let Some(v) = update.content_engagement {
            self.content_engagement = v;
        }
        if let Some(v) = update.team_loyalty {
            self.team_loyalty = v;
        }
        self.last_updated = last_updated;
    }

    /// Sub-scores formatted for the dashboard breakdown.
    pub fn categories(&self) -> Vec<ScoreCategory> {
        vec![
            ScoreCategory {
                name: "Interações Sociais",
                value: self.social_interactions,
                max: CATEGORY_MAX,
                field: "socialInteractions",
            },
            ScoreCategory {
                name: "Presença em Eventos",
                value: self.event_presence,
                max: CATEGORY_MAX,
                field: "eventPresence",
            },
            ScoreCategory {
                name: "Engajamento em Conteúdo",
                value: self.content_engagement,
                max: CATEGORY_MAX,
                field: "contentEngagement",
            },
            ScoreCategory {
                name: "Fidelidade às Equipes",
                value: self.team_loyalty,
                max: CATEGORY_MAX,
                field: "teamLoyalty",
            },
        ]
    }
}

/// One sub-score as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct ScoreCategory {
    pub name: &'static str,
    pub value: i32,
    pub max: i32,
    pub field: &'static str,
}
