// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Twitter OAuth 2.0 client (authorization code flow with PKCE).
//!
//! Handles:
//! - Building the authorization URL
//! - Exchanging the callback code for tokens
//! - Fetching the authenticated user's profile

use crate::error::AppError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use serde::Deserialize;
use sha2::{Digest, Sha256};

const AUTHORIZE_URL: &str = "https://twitter.com/i/oauth2/authorize";
const API_BASE_URL: &str = "https://api.twitter.com/2";
const SCOPES: &str = "tweet.read users.read offline.access";

/// Twitter API client.
#[derive(Clone)]
pub struct TwitterClient {
    http: reqwest::Client,
    authorize_url: String,
    api_base_url: String,
    client_id: String,
    client_secret: String,
}

impl TwitterClient {
    /// Create a new Twitter client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self::with_base_urls(
            client_id,
            client_secret,
            AUTHORIZE_URL.to_string(),
            API_BASE_URL.to_string(),
        )
    }

    /// Create a client against non-default endpoints (local mocks).
    pub fn with_base_urls(
        client_id: String,
        client_secret: String,
        authorize_url: String,
        api_base_url: String,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            authorize_url,
            api_base_url,
            client_id,
            client_secret,
        }
    }

    /// URL the browser is sent to for consent.
    pub fn authorize_url(&self, callback_url: &str, state: &str, code_challenge: &str) -> String {
        format!(
            "{}?response_type=code&\
             client_id={}&\
             redirect_uri={}&\
             scope={}&\
             state={}&\
             code_challenge={}&\
             code_challenge_method=S256",
            self.authorize_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(callback_url),
            urlencoding::encode(SCOPES),
            urlencoding::encode(state),
            code_challenge
        )
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(
        &self,
        code: &str,
        callback_url: &str,
        code_verifier: &str,
    ) -> Result<TokenResponse, AppError> {
        let response = self
            .http
            .post(format!("{}/oauth2/token", self.api_base_url))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", callback_url),
                ("code_verifier", code_verifier),
                ("client_id", self.client_id.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::TwitterApi(format!("Token exchange request failed: {}", e)))?;

        check_response_json(response).await
    }

    /// Get the profile of the user owning `access_token`.
    pub async fn get_me(&self, access_token: &str) -> Result<TwitterProfile, AppError> {
        let response = self
            .http
            .get(format!("{}/users/me", self.api_base_url))
            .query(&[("user.fields", "profile_image_url")])
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::TwitterApi(e.to_string()))?;

        let envelope: UserEnvelope = check_response_json(response).await?;
        Ok(envelope.data)
    }
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 429 {
            tracing::warn!("Twitter rate limit hit (429)");
        }

        return Err(AppError::TwitterApi(format!("HTTP {}: {}", status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::TwitterApi(format!("JSON parse error: {}", e)))
}

/// Token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Authenticated Twitter user.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TwitterProfile {
    pub id: String,
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

#[derive(Deserialize)]
struct UserEnvelope {
    data: TwitterProfile,
}

// ─── PKCE ────────────────────────────────────────────────────────

/// Random 43-character verifier (32 bytes, base64url).
pub fn generate_code_verifier() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// S256 challenge for a verifier.
pub fn code_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}
