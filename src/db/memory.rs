// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile + OAuth credentials)
//! - Fan scores (one per user)
//! - Score feedback (append-only log)
//!
//! Everything lives in process memory and is lost on restart. Identifiers are
//! per-collection counters starting at 1 and are never reused.

use crate::models::{
    FanScore, FanScoreUpdate, NewFanScore, NewScoreFeedback, NewUser, ScoreFeedback, User,
    UserUpdate,
};
use crate::time_utils::now_after;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Store errors. Absence is never an error; lookups return `Option`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Twitter account already linked: {0}")]
    TwitterIdTaken(String),

    #[error("Fan score already exists for user {0}")]
    FanScoreExists(u64),
}

#[derive(Default)]
struct Collections {
    users: DashMap<u64, User>,
    /// username -> user id
    usernames: DashMap<String, u64>,
    /// twitter id -> user id
    twitter_ids: DashMap<String, u64>,
    /// Keyed by user id, not score id.
    fan_scores: DashMap<u64, FanScore>,
    feedback: RwLock<Vec<ScoreFeedback>>,
    last_user_id: AtomicU64,
    last_score_id: AtomicU64,
    last_feedback_id: AtomicU64,
}

/// In-memory database. Clones share the same collections.
#[derive(Clone, Default)]
pub struct MemoryDb {
    inner: Arc<Collections>,
}

fn next_id(counter: &AtomicU64) -> u64 {
    counter.fetch_add(1, Ordering::Relaxed) + 1
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by ID.
    pub fn get_user(&self, id: u64) -> Option<User> {
        self.inner.users.get(&id).map(|u| u.value().clone())
    }

    /// Get a user by unique username.
    pub fn get_user_by_username(&self, username: &str) -> Option<User> {
        let id = *self.inner.usernames.get(username)?;
        self.get_user(id)
    }

    /// Get a user by linked Twitter account ID.
    pub fn get_user_by_twitter_id(&self, twitter_id: &str) -> Option<User> {
        let id = *self.inner.twitter_ids.get(twitter_id)?;
        self.get_user(id)
    }

    /// Create a user, assigning the next ID and stamping `last_login`.
    ///
    /// The Twitter ID (if any) is reserved first, then the username; both
    /// index entries stay locked until the user is inserted, so concurrent
    /// creates cannot claim the same name or Twitter account.
    pub fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let twitter_slot = match &new.twitter_id {
            Some(twitter_id) => match self.inner.twitter_ids.entry(twitter_id.clone()) {
                Entry::Occupied(_) => return Err(StoreError::TwitterIdTaken(twitter_id.clone())),
                Entry::Vacant(slot) => Some(slot),
            },
            None => None,
        };

        let user = match self.inner.usernames.entry(new.username.clone()) {
            Entry::Occupied(_) => return Err(StoreError::UsernameTaken(new.username)),
            Entry::Vacant(slot) => {
                let id = next_id(&self.inner.last_user_id);
                let user = User::from_new(id, new, Utc::now());
                self.inner.users.insert(id, user.clone());
                slot.insert(id);
                user
            }
        };

        if let Some(slot) = twitter_slot {
            slot.insert(user.id);
        }

        tracing::debug!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Merge `update` onto an existing user. Returns `None` if no such user.
    pub fn update_user(&self, id: u64, update: UserUpdate) -> Option<User> {
        let mut user = self.inner.users.get_mut(&id)?;
        user.apply(update);
        Some(user.value().clone())
    }

    // ─── Fan Score Operations ────────────────────────────────────

    /// Get the fan score for a user.
    pub fn get_fan_score(&self, user_id: u64) -> Option<FanScore> {
        self.inner.fan_scores.get(&user_id).map(|s| s.value().clone())
    }

    /// Store a new fan score, assigning an ID and stamping `last_updated`.
    pub fn create_fan_score(&self, new: NewFanScore) -> Result<FanScore, StoreError> {
        match self.inner.fan_scores.entry(new.user_id) {
            Entry::Occupied(_) => Err(StoreError::FanScoreExists(new.user_id)),
            Entry::Vacant(slot) => {
                let id = next_id(&self.inner.last_score_id);
                let score = FanScore::from_new(id, new, Utc::now());
                slot.insert(score.clone());
                tracing::debug!(
                    user_id = score.user_id,
                    overall_score = score.overall_score,
                    "Fan score created"
                );
                Ok(score)
            }
        }
    }

    /// Merge `update` onto a user's score and re-stamp `last_updated`.
    /// Returns `None` if the user has no score.
    pub fn update_fan_score(&self, user_id: u64, update: FanScoreUpdate) -> Option<FanScore> {
        let mut score = self.inner.fan_scores.get_mut(&user_id)?;
        let stamp = now_after(score.last_updated);
        score.apply(update, stamp);
        Some(score.value().clone())
    }

    // ─── Feedback Operations ─────────────────────────────────────

    /// Append a feedback record.
    pub fn create_score_feedback(&self, new: NewScoreFeedback) -> ScoreFeedback {
        let mut log = self
            .inner
            .feedback
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // Allocate under the lock so IDs follow log order.
        let id = next_id(&self.inner.last_feedback_id);
        let feedback = ScoreFeedback::from_new(id, new, Utc::now());
        log.push(feedback.clone());
        feedback
    }

    /// All feedback for a user, oldest first.
    pub fn get_score_feedback_by_user_id(&self, user_id: u64) -> Vec<ScoreFeedback> {
        self.inner
            .feedback
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeedbackOption;

    fn alice() -> NewUser {
        NewUser {
            username: "alice".to_string(),
            display_name: Some("Alice".to_string()),
            ..Default::default()
        }
    }

    fn score_for(user_id: u64, overall: i32) -> NewFanScore {
        NewFanScore {
            user_id,
            overall_score: overall,
            social_interactions: 50,
            event_presence: 60,
            content_engagement: 70,
            team_loyalty: 80,
        }
    }

    #[test]
    fn test_create_then_get_user() {
        let db = MemoryDb::new();
        let before = Utc::now();
        let user = db.create_user(alice()).unwrap();

        assert_eq!(user.id, 1);
        assert!(user.last_login >= before);
        assert_eq!(db.get_user(1), Some(user.clone()));
        assert_eq!(user.username, "alice");
        assert_eq!(user.display_name.as_deref(), Some("Alice"));
        assert_eq!(user.twitter_id, None);
    }

    #[test]
    fn test_user_ids_are_sequential() {
        let db = MemoryDb::new();
        let a = db.create_user(alice()).unwrap();
        let b = db
            .create_user(NewUser {
                username: "bob".to_string(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[test]
    fn test_duplicate_username_is_rejected() {
        let db = MemoryDb::new();
        db.create_user(alice()).unwrap();
        assert_eq!(
            db.create_user(alice()),
            Err(StoreError::UsernameTaken("alice".to_string()))
        );

        // Rejected create does not burn an ID.
        let bob = db
            .create_user(NewUser {
                username: "bob".to_string(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(bob.id, 2);
    }

    #[test]
    fn test_duplicate_twitter_id_is_rejected() {
        let db = MemoryDb::new();
        db.create_user(NewUser {
            username: "alice".to_string(),
            twitter_id: Some("42".to_string()),
            ..Default::default()
        })
        .unwrap();

        let err = db
            .create_user(NewUser {
                username: "alice2".to_string(),
                twitter_id: Some("42".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err, StoreError::TwitterIdTaken("42".to_string()));
    }

    #[test]
    fn test_secondary_lookups() {
        let db = MemoryDb::new();
        let user = db
            .create_user(NewUser {
                username: "alice".to_string(),
                twitter_id: Some("tw-1".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(db.get_user_by_username("alice"), Some(user.clone()));
        assert_eq!(db.get_user_by_twitter_id("tw-1"), Some(user));
        assert_eq!(db.get_user_by_username("nobody"), None);
        assert_eq!(db.get_user_by_twitter_id("tw-2"), None);
        assert_eq!(db.get_user(99), None);
    }

    #[test]
    fn test_update_user() {
        let db = MemoryDb::new();
        let user = db.create_user(alice()).unwrap();

        let updated = db
            .update_user(
                user.id,
                UserUpdate {
                    access_token: Some("tok".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.access_token.as_deref(), Some("tok"));
        assert_eq!(updated.display_name.as_deref(), Some("Alice"));
        assert_eq!(db.get_user(user.id), Some(updated));
        assert!(db.update_user(404, UserUpdate::default()).is_none());
    }

    #[test]
    fn test_create_then_get_fan_score() {
        let db = MemoryDb::new();
        let created = db.create_fan_score(score_for(1, 85)).unwrap();

        let fetched = db.get_fan_score(1).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.id, 1);
        for v in [
            fetched.overall_score,
            fetched.social_interactions,
            fetched.event_presence,
            fetched.content_engagement,
            fetched.team_loyalty,
        ] {
            assert!((1..=100).contains(&v));
        }
        assert!(db.get_fan_score(2).is_none());
    }

    #[test]
    fn test_second_fan_score_for_user_is_rejected() {
        let db = MemoryDb::new();
        db.create_fan_score(score_for(1, 85)).unwrap();
        assert_eq!(
            db.create_fan_score(score_for(1, 10)),
            Err(StoreError::FanScoreExists(1))
        );
        assert_eq!(db.get_fan_score(1).unwrap().overall_score, 85);
    }

    #[test]
    fn test_update_fan_score_restamps_and_keeps_other_fields() {
        let db = MemoryDb::new();
        let created = db.create_fan_score(score_for(1, 85)).unwrap();

        let updated = db
            .update_fan_score(
                1,
                FanScoreUpdate {
                    team_loyalty: Some(99),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(updated.last_updated > created.last_updated);
        assert_eq!(updated.team_loyalty, 99);
        assert_eq!(updated.overall_score, 85);
        assert_eq!(updated.social_interactions, 50);
        assert_eq!(updated.id, created.id);

        let again = db.update_fan_score(1, FanScoreUpdate::default()).unwrap();
        assert!(again.last_updated > updated.last_updated);
    }

    #[test]
    fn test_update_missing_fan_score() {
        let db = MemoryDb::new();
        assert!(db.update_fan_score(7, FanScoreUpdate::default()).is_none());
    }

    #[test]
    fn test_feedback_preserves_insertion_order() {
        let db = MemoryDb::new();
        let options = [
            FeedbackOption::TooLow,
            FeedbackOption::Accurate,
            FeedbackOption::TooHigh,
        ];
        for (i, feedback) in options.iter().enumerate() {
            db.create_score_feedback(NewScoreFeedback {
                user_id: 1,
                feedback: *feedback,
                comment: Some(format!("c{i}")),
            });
            // Interleave another user's feedback.
            db.create_score_feedback(NewScoreFeedback {
                user_id: 2,
                feedback: FeedbackOption::NotSure,
                comment: None,
            });
        }

        let mine = db.get_score_feedback_by_user_id(1);
        let got: Vec<_> = mine.iter().map(|f| f.feedback).collect();
        assert_eq!(got, options);
        let ids: Vec<_> = mine.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
        assert_eq!(db.get_score_feedback_by_user_id(2).len(), 3);
        assert!(db.get_score_feedback_by_user_id(3).is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let db = MemoryDb::new();
        let other = db.clone();
        db.create_user(alice()).unwrap();
        assert!(other.get_user_by_username("alice").is_some());
    }

    #[test]
    fn test_concurrent_creates_of_same_username() {
        let db = MemoryDb::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let db = db.clone();
                std::thread::spawn(move || db.create_user(alice()).is_ok())
            })
            .collect();

        let created = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(created, 1);
    }

    #[test]
    fn test_concurrent_creates_of_same_twitter_id() {
        let db = MemoryDb::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let db = db.clone();
                std::thread::spawn(move || {
                    db.create_user(NewUser {
                        username: format!("handle{i}"),
                        twitter_id: Some("777".to_string()),
                        ..Default::default()
                    })
                    .ok()
                })
            })
            .collect();

        let created: Vec<User> = handles
            .into_iter()
            .filter_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(created.len(), 1);
        assert_eq!(db.get_user_by_twitter_id("777"), Some(created[0].clone()));
    }

    #[test]
    fn test_username_clash_does_not_claim_twitter_id() {
        let db = MemoryDb::new();
        db.create_user(alice()).unwrap();

        let err = db
            .create_user(NewUser {
                username: "alice".to_string(),
                twitter_id: Some("42".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err, StoreError::UsernameTaken("alice".to_string()));
        assert!(db.get_user_by_twitter_id("42").is_none());

        let user = db
            .create_user(NewUser {
                username: "alice_42".to_string(),
                twitter_id: Some("42".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(db.get_user_by_twitter_id("42"), Some(user));
    }
}
