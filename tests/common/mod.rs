// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::response::Response;
use fanscore_hub::config::Config;
use fanscore_hub::middleware::auth::create_jwt;
use fanscore_hub::models::{NewFanScore, NewUser, User};
use fanscore_hub::routes::create_router;
use fanscore_hub::services::TwitterClient;
use fanscore_hub::AppState;
use std::sync::Arc;

/// Create a test app with an empty store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::test_default())
}

/// Create a test app whose frontend lives at `frontend_url`.
#[allow(dead_code)]
pub fn create_test_app_with_frontend_url(frontend_url: &str) -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::test_with_frontend_url(frontend_url))
}

#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config));
    (create_router(state.clone()), state)
}

/// Create a test app whose Twitter client talks to `api_base_url`.
#[allow(dead_code)]
pub fn create_test_app_with_twitter(api_base_url: &str) -> (axum::Router, Arc<AppState>) {
    let mut state = AppState::new(Config::test_default());
    state.twitter = Some(TwitterClient::with_base_urls(
        "test_client_id".to_string(),
        "test_client_secret".to_string(),
        "https://twitter.com/i/oauth2/authorize".to_string(),
        api_base_url.to_string(),
    ));
    let state = Arc::new(state);
    (create_router(state.clone()), state)
}

/// Session token for `user_id` signed with the app's key.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: u64, signing_key: &[u8]) -> String {
    create_jwt(user_id, signing_key).expect("Failed to create JWT")
}

/// Insert a user named `username` and return it.
#[allow(dead_code)]
pub fn seed_user(state: &AppState, username: &str) -> User {
    state
        .db
        .create_user(NewUser {
            username: username.to_string(),
            display_name: Some(username.to_string()),
            ..Default::default()
        })
        .expect("Failed to create user")
}

/// Insert a score whose sub-scores are fixed and overall is `overall`.
#[allow(dead_code)]
pub fn seed_score(state: &AppState, user_id: u64, overall: i32) {
    state
        .db
        .create_fan_score(NewFanScore {
            user_id,
            overall_score: overall,
            social_interactions: 11,
            event_presence: 22,
            content_engagement: 33,
            team_loyalty: 44,
        })
        .expect("Failed to create fan score");
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
