// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login routes: Twitter OAuth, demo login, logout and session status.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Redirect,
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;
use subtle::ConstantTimeEq;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::auth::{
    create_jwt, resolve_session, session_cookie, session_removal_cookie,
};
use crate::models::User;
use crate::services::twitter::{code_challenge, generate_code_verifier};
use crate::services::{accounts, LoginOutcome};
use crate::AppState;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// Cookie carrying the PKCE verifier between start and callback.
pub const VERIFIER_COOKIE: &str = "fanscore_oauth_verifier";
/// Path both the Twitter start and callback routes share.
const CALLBACK_PATH: &str = "/api/auth/twitter/callback";
/// How long a signed OAuth state stays valid (10 minutes).
const STATE_MAX_AGE_MS: u128 = 10 * 60 * 1000;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/status", get(auth_status))
        .route("/api/auth/twitter", get(twitter_start))
        .route(CALLBACK_PATH, get(twitter_callback))
        .route("/api/auth/demo-login", get(demo_login))
        .route("/api/auth/logout", get(logout))
}

// ─── Session Status ──────────────────────────────────────────

/// Public view of a user. Credentials are never included.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct UserResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub username: String,
    pub twitter_username: Option<String>,
    pub display_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub last_login: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            twitter_username: user.twitter_username,
            display_name: user.display_name,
            profile_image_url: user.profile_image_url,
            last_login: user.last_login,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct AuthStatusResponse {
    pub is_authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

/// Report whether the caller has a live session.
async fn auth_status(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Json<AuthStatusResponse> {
    let user = resolve_session(&state, &jar, &headers);
    Json(AuthStatusResponse {
        is_authenticated: user.is_some(),
        user: user.map(UserResponse::from),
    })
}

// ─── Twitter OAuth ───────────────────────────────────────────

/// Start OAuth flow - redirect to Twitter authorization.
async fn twitter_start(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect)> {
    let twitter = state
        .twitter
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Twitter login is not configured".to_string()))?;

    let verifier = generate_code_verifier();
    let challenge = code_challenge(&verifier);
    let oauth_state = sign_state(&state.config.oauth_state_key, now_millis()?, &challenge)?;

    let callback_url = callback_url(&headers);
    let auth_url = twitter.authorize_url(&callback_url, &oauth_state, &challenge);

    tracing::info!(callback = %callback_url, "Starting OAuth flow, redirecting to Twitter");

    let cookie = Cookie::build((VERIFIER_COOKIE, verifier))
        .path(CALLBACK_PATH)
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.secure_cookies())
        .max_age(time::Duration::milliseconds(STATE_MAX_AGE_MS as i64))
        .build();

    Ok((jar.add(cookie), Redirect::temporary(&auth_url)))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - exchange code, upsert user, start session.
async fn twitter_callback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect)> {
    let twitter = state
        .twitter
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Twitter login is not configured".to_string()))?;

    let verifier = jar.get(VERIFIER_COOKIE).map(|c| c.value().to_string());
    let jar = jar.remove(
        Cookie::build(VERIFIER_COOKIE)
            .path(CALLBACK_PATH)
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(state.config.secure_cookies()),
    );
    let failure = |reason: &str| {
        Redirect::temporary(&format!(
            "{}/?error={}",
            state.config.frontend_url,
            urlencoding::encode(reason)
        ))
    };

    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from Twitter");
        return Ok((jar, failure(&error)));
    }

    let (Some(code), Some(oauth_state), Some(verifier)) = (params.code, params.state, verifier)
    else {
        tracing::warn!("OAuth callback missing code, state or verifier");
        return Ok((jar, failure("invalid_request")));
    };

    if !verify_state(
        &oauth_state,
        &state.config.oauth_state_key,
        &code_challenge(&verifier),
        now_millis()?,
    ) {
        tracing::warn!("Invalid, expired or tampered OAuth state");
        return Ok((jar, failure("invalid_state")));
    }

    tracing::info!("Exchanging authorization code for tokens");
    let callback_url = callback_url(&headers);
    let tokens = twitter
        .exchange_code(&code, &callback_url, &verifier)
        .await?;
    let profile = twitter.get_me(&tokens.access_token).await?;

    let outcome = match accounts::upsert_twitter_user(&state.db, profile, tokens) {
        Ok(outcome) => outcome,
        Err(AppError::Conflict(reason)) => {
            tracing::warn!(reason = %reason, "Could not create account for Twitter user");
            return Ok((jar, failure("account_conflict")));
        }
        Err(e) => return Err(e),
    };
    tracing::info!(
        user_id = outcome.user.id,
        created = outcome.created,
        "OAuth successful"
    );

    let jar = start_session(&state, jar, &outcome)?;
    Ok((jar, dashboard_redirect(&state)))
}

// ─── Demo Login ──────────────────────────────────────────────

/// Log in as the shared demo account (created on first use).
async fn demo_login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect)> {
    if !state.config.demo_login_enabled {
        return Err(AppError::NotFound("Demo login is disabled".to_string()));
    }

    let outcome = accounts::demo_login(&state.db)?;
    let jar = start_session(&state, jar, &outcome)?;
    Ok((jar, dashboard_redirect(&state)))
}

// ─── Logout ──────────────────────────────────────────────────

/// Clear the session cookie and return to the landing page.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.add(session_removal_cookie(&state.config));
    (
        jar,
        Redirect::temporary(&format!("{}/", state.config.frontend_url)),
    )
}

// ─── Helpers ─────────────────────────────────────────────────

fn start_session(state: &AppState, jar: CookieJar, outcome: &LoginOutcome) -> Result<CookieJar> {
    let jwt = create_jwt(outcome.user.id, &state.config.session_secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;
    Ok(jar.add(session_cookie(jwt, &state.config)))
}

fn dashboard_redirect(state: &AppState) -> Redirect {
    Redirect::temporary(&format!("{}/dashboard", state.config.frontend_url))
}

/// Callback URL derived from the request's `Host` header.
fn callback_url(headers: &HeaderMap) -> String {
    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost:8080");

    let scheme = if host.contains("localhost") || host.contains("127.0.0.1") {
        "http"
    } else {
        "https"
    };

    format!("{}://{}{}", scheme, host, CALLBACK_PATH)
}

fn now_millis() -> Result<u128> {
    use std::time::{SystemTime, UNIX_EPOCH};
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_millis())
}

fn state_signature(secret: &[u8], payload: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Sign `timestamp|challenge` into an opaque OAuth `state`.
///
/// The challenge is not embedded in the state; the callback recomputes it
/// from the verifier cookie, binding the state to this browser.
fn sign_state(secret: &[u8], timestamp_ms: u128, challenge: &str) -> Result<String> {
    let timestamp_hex = format!("{:x}", timestamp_ms);
    let signature = state_signature(secret, &format!("{}|{}", timestamp_hex, challenge))?;
    Ok(URL_SAFE_NO_PAD.encode(format!("{}|{}", timestamp_hex, signature)))
}

/// Verify an OAuth `state` against the verifier's challenge and its age.
fn verify_state(state: &str, secret: &[u8], challenge: &str, now_ms: u128) -> bool {
    let Some(decoded) = URL_SAFE_NO_PAD
        .decode(state)
        .ok()
        .and_then(|b| String::from_utf8(b).ok())
    else {
        return false;
    };

    let Some((timestamp_hex, signature_hex)) = decoded.split_once('|') else {
        return false;
    };

    let Ok(expected) = state_signature(secret, &format!("{}|{}", timestamp_hex, challenge)) else {
        return false;
    };
    if !bool::from(expected.as_bytes().ct_eq(signature_hex.as_bytes())) {
        tracing::error!("OAuth state signature mismatch! Potential tampering.");
        return false;
    }

    match u128::from_str_radix(timestamp_hex, 16) {
        Ok(issued) => now_ms >= issued && now_ms - issued <= STATE_MAX_AGE_MS,
        Err(_) => false,
    }
}
