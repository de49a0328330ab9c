// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end store walkthrough without HTTP: a user, a score, a tier and
//! a piece of feedback.

use fanscore_hub::db::{MemoryDb, StoreError};
use fanscore_hub::models::{
    get_user_tier, FanScoreTier, FanScoreUpdate, FeedbackOption, NewFanScore, NewScoreFeedback,
    NewUser,
};

#[test]
fn test_user_score_tier_feedback_walkthrough() {
    let db = MemoryDb::new();

    let alice = db
        .create_user(NewUser {
            username: "alice".to_string(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(alice.id, 1);

    let score = db
        .create_fan_score(NewFanScore {
            user_id: alice.id,
            overall_score: 85,
            social_interactions: 70,
            event_presence: 90,
            content_engagement: 60,
            team_loyalty: 95,
        })
        .unwrap();

    let tier = get_user_tier(score.overall_score);
    assert_eq!(tier.tier, FanScoreTier::PanteraAlfa);
    assert_eq!(tier.title, "Pantera Alfa");
    assert!(tier
        .benefits()
        .iter()
        .any(|b| b.title == "Acesso Antecipado"));

    let feedback = db.create_score_feedback(NewScoreFeedback {
        user_id: alice.id,
        feedback: FeedbackOption::TooLow,
        comment: None,
    });
    assert_eq!(feedback.id, 1);

    let listed = db.get_score_feedback_by_user_id(alice.id);
    assert_eq!(listed, vec![feedback]);
    assert!(db.get_score_feedback_by_user_id(2).is_empty());
}

#[test]
fn test_score_update_moves_tier() {
    let db = MemoryDb::new();
    let user = db
        .create_user(NewUser {
            username: "bob".to_string(),
            ..Default::default()
        })
        .unwrap();
    let created = db
        .create_fan_score(NewFanScore {
            user_id: user.id,
            overall_score: 39,
            social_interactions: 1,
            event_presence: 1,
            content_engagement: 1,
            team_loyalty: 1,
        })
        .unwrap();
    assert_eq!(get_user_tier(created.overall_score).tier, FanScoreTier::Novato);

    let updated = db
        .update_fan_score(
            user.id,
            FanScoreUpdate {
                overall_score: Some(60),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(
        get_user_tier(updated.overall_score).tier,
        FanScoreTier::DaleHardcore
    );
    assert!(updated.last_updated > created.last_updated);
    assert_eq!(updated.team_loyalty, 1);
}

#[test]
fn test_duplicate_username_rejected() {
    let db = MemoryDb::new();
    let new = NewUser {
        username: "alice".to_string(),
        ..Default::default()
    };
    db.create_user(new.clone()).unwrap();
    assert_eq!(
        db.create_user(new).unwrap_err(),
        StoreError::UsernameTaken("alice".to_string())
    );
    assert!(db.get_user(2).is_none());
}
