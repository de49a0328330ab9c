// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use chrono::{DateTime, Utc};

/// User profile held in the in-memory store.
///
/// Never serialized directly; API handlers project it into a response type
/// so OAuth credentials cannot leak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Sequential user ID (primary key)
    pub id: u64,
    /// Unique login name
    pub username: String,
    /// Twitter account ID, if the user signed in with Twitter
    pub twitter_id: Option<String>,
    /// Twitter handle (without the `@`)
    pub twitter_username: Option<String>,
    /// Name shown on the dashboard
    pub display_name: Option<String>,
    /// Avatar URL
    pub profile_image_url: Option<String>,
    /// OAuth access token
    pub access_token: Option<String>,
    /// OAuth refresh token
    pub access_token_secret: Option<String>,
    /// Last successful login
    pub last_login: DateTime<Utc>,
}

/// Fields supplied when creating a user. The store assigns `id` and
/// `last_login`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub twitter_id: Option<String>,
    pub twitter_username: Option<String>,
    pub display_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub access_token: Option<String>,
    pub access_token_secret: Option<String>,
}

/// Partial update merged onto an existing user. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub display_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub access_token: Option<String>,
    pub access_token_secret: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Build a stored user from creation fields.
    pub fn from_new(id: u64, new: NewUser, last_login: DateTime<Utc>) -> Self {
        Self {
            id,
            username: new.username,
            twitter_id: new.twitter_id,
            twitter_username: new.twitter_username,
            display_name: new.display_name,
            profile_image_url: new.profile_image_url,
            access_token: new.access_token,
            access_token_secret: new.access_token_secret,
            last_login,
        }
    }

    /// Merge the present fields of `update` onto this user.
    pub fn apply(&mut self, update: UserUpdate) {
        if let Some(v) = update.display_name {
            self.display_name = Some(v);
        }
        if let Some(v) = update.profile_image_url {
            self.profile_image_url = Some(v);
        }
        if let Some(v) = update.access_token {
            self.access_token = Some(v);
        }
        if let Some(v) = update.access_token_secret {
            self.access_token_secret = Some(v);
        }
        if let Some(v) = update.last_login {
            self.last_login = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_unspecified_fields() {
        let mut user = User::from_new(
            7,
            NewUser {
                username: "alice".to_string(),
                display_name: Some("Alice".to_string()),
                profile_image_url: Some("https://img/a.png".to_string()),
                ..Default::default()
            },
            Utc::now(),
        );

        user.apply(UserUpdate {
            display_name: Some("Alice B".to_string()),
            ..Default::default()
        });

        assert_eq!(user.display_name.as_deref(), Some("Alice B"));
        assert_eq!(user.profile_image_url.as_deref(), Some("https://img/a.png"));
        assert_eq!(user.username, "alice");
    }
}
