// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account upserts for the two login paths (Twitter and demo).

use crate::db::{MemoryDb, StoreError};
use crate::error::{AppError, Result};
use crate::models::{FanScore, NewUser, User, UserUpdate};
use crate::services::scoring::random_fan_score;
use crate::services::twitter::{TokenResponse, TwitterProfile};
use chrono::Utc;

/// Username of the shared demo account.
pub const DEMO_USERNAME: &str = "demo_user";
/// Display name of the shared demo account.
pub const DEMO_DISPLAY_NAME: &str = "Fã Demo";

/// Result of a login upsert.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    /// True when this login created the account.
    pub created: bool,
}

/// Return the user's score, assigning a random one if they have none.
pub fn ensure_fan_score(db: &MemoryDb, user_id: u64) -> Result<FanScore> {
    if let Some(score) = db.get_fan_score(user_id) {
        return Ok(score);
    }

    match db.create_fan_score(random_fan_score(user_id)) {
        Ok(score) => {
            tracing::info!(
                user_id,
                overall_score = score.overall_score,
                "Assigned initial fan score"
            );
            Ok(score)
        }
        // Lost a race with a concurrent login; the other score wins.
        Err(StoreError::FanScoreExists(_)) => db
            .get_fan_score(user_id)
            .ok_or_else(|| AppError::NotFound(format!("Fan score for user {}", user_id))),
        Err(e) => Err(e.into()),
    }
}

/// Create or refresh the user behind a Twitter login.
///
/// Existing accounts get fresh credentials, display name, avatar and login
/// time. New accounts are created and assigned a fan score.
pub fn upsert_twitter_user(
    db: &MemoryDb,
    profile: TwitterProfile,
    tokens: TokenResponse,
) -> Result<LoginOutcome> {
    if let Some(existing) = db.get_user_by_twitter_id(&profile.id) {
        let user = db
            .update_user(
                existing.id,
                UserUpdate {
                    display_name: Some(profile.name),
                    profile_image_url: profile.profile_image_url,
                    access_token: Some(tokens.access_token),
                    access_token_secret: tokens.refresh_token,
                    last_login: Some(Utc::now()),
                },
            )
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", existing.id)))?;

        tracing::info!(user_id = user.id, username = %user.username, "Returning Twitter user");
        return Ok(LoginOutcome {
            user,
            created: false,
        });
    }

    let new = NewUser {
        username: profile.username.clone(),
        twitter_id: Some(profile.id.clone()),
        twitter_username: Some(profile.username.clone()),
        display_name: Some(profile.name),
        profile_image_url: profile.profile_image_url,
        access_token: Some(tokens.access_token),
        access_token_secret: tokens.refresh_token,
    };

    // Handles get recycled by Twitter and may collide with local accounts
    // such as the demo user; the Twitter ID keeps the fallback unique.
    let user = match db.create_user(new.clone()) {
        Err(StoreError::UsernameTaken(taken)) => {
            let username = format!("{}_{}", taken, profile.id);
            tracing::info!(
                taken = %taken,
                username = %username,
                "Twitter handle in use, disambiguating"
            );
            db.create_user(NewUser { username, ..new })?
        }
        result => result?,
    };
    ensure_fan_score(db, user.id)?;

    tracing::info!(user_id = user.id, username = %user.username, "New Twitter user");
    Ok(LoginOutcome {
        user,
        created: true,
    })
}

/// Create or reuse the fixed demo account.
pub fn demo_login(db: &MemoryDb) -> Result<LoginOutcome> {
    let (user, created) = match db.get_user_by_username(DEMO_USERNAME) {
        Some(existing) => (refresh_login(db, existing.id)?, false),
        None => match db.create_user(NewUser {
            username: DEMO_USERNAME.to_string(),
            display_name: Some(DEMO_DISPLAY_NAME.to_string()),
            ..Default::default()
        }) {
            Ok(user) => (user, true),
            Err(StoreError::UsernameTaken(_)) => {
                let existing = db.get_user_by_username(DEMO_USERNAME).ok_or_else(|| {
                    AppError::NotFound(format!("User {} not found", DEMO_USERNAME))
                })?;
                (refresh_login(db, existing.id)?, false)
            }
            Err(e) => return Err(e.into()),
        },
    };

    ensure_fan_score(db, user.id)?;
    tracing::info!(user_id = user.id, created, "Demo login");
    Ok(LoginOutcome { user, created })
}

fn refresh_login(db: &MemoryDb, user_id: u64) -> Result<User> {
    db.update_user(
        user_id,
        UserUpdate {
            last_login: Some(Utc::now()),
            ..Default::default()
        },
    )
    .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
}
