// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honored for local development.

use hkdf::Hkdf;
use sha2::Sha256;
use std::env;

/// HKDF info string for the OAuth state signing key.
const OAUTH_STATE_KEY_INFO: &[u8] = b"fanscore-hub oauth state v1";

/// Twitter OAuth 2.0 app credentials.
#[derive(Debug, Clone)]
pub struct TwitterCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL for post-login redirects
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// JWT signing key for session tokens (raw bytes)
    pub session_secret: Vec<u8>,
    /// HMAC key for the OAuth `state` parameter, derived from the session secret
    pub oauth_state_key: Vec<u8>,
    /// Twitter login is disabled when unset
    pub twitter: Option<TwitterCredentials>,
    /// Whether `/api/auth/demo-login` is served
    pub demo_login_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let session_secret = env::var("SESSION_SECRET")
            .map(|v| v.trim().to_string())
            .map_err(|_| ConfigError::Missing("SESSION_SECRET"))?
            .into_bytes();

        let twitter = match (env::var("TWITTER_CLIENT_ID"), env::var("TWITTER_CLIENT_SECRET")) {
            (Ok(client_id), Ok(client_secret)) => Some(TwitterCredentials {
                client_id: client_id.trim().to_string(),
                client_secret: client_secret.trim().to_string(),
            }),
            _ => None,
        };

        Self::build(
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string()),
            env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            session_secret,
            twitter,
            env::var("DEMO_LOGIN_ENABLED")
                .map(|v| parse_bool(&v))
                .unwrap_or(true),
        )
    }

    /// Assemble a config, deriving the OAuth state key.
    pub fn build(
        frontend_url: String,
        port: u16,
        session_secret: Vec<u8>,
        twitter: Option<TwitterCredentials>,
        demo_login_enabled: bool,
    ) -> Result<Self, ConfigError> {
        if session_secret.len() < 32 {
            return Err(ConfigError::Invalid(
                "SESSION_SECRET must be at least 32 bytes",
            ));
        }

        let oauth_state_key = derive_key(&session_secret, OAUTH_STATE_KEY_INFO)?;

        Ok(Self {
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
            port,
            session_secret,
            oauth_state_key,
            twitter,
            demo_login_enabled,
        })
    }

    /// Config for tests: demo login on, Twitter configured with dummy
    /// credentials.
    pub fn test_default() -> Self {
        Self::test_with_frontend_url("http://localhost:5173")
    }

    /// [`Config::test_default`] with a different frontend URL.
    pub fn test_with_frontend_url(frontend_url: &str) -> Self {
        let session_secret = b"test_session_secret_32_bytes_min!".to_vec();
        Self {
            frontend_url: frontend_url.to_string(),
            port: 8080,
            oauth_state_key: derive_key(&session_secret, OAUTH_STATE_KEY_INFO)
                .unwrap_or_else(|_| session_secret.clone()),
            session_secret,
            twitter: Some(TwitterCredentials {
                client_id: "test_client_id".to_string(),
                client_secret: "test_client_secret".to_string(),
            }),
            demo_login_enabled: true,
        }
    }

    /// Whether cookies must carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.frontend_url.starts_with("https://")
    }
}

fn derive_key(secret: &[u8], info: &[u8]) -> Result<Vec<u8>, ConfigError> {
    let mut okm = [0u8; 32];
    Hkdf::<Sha256>::new(None, secret)
        .expand(info, &mut okm)
        .map_err(|_| ConfigError::Invalid("HKDF expand failed"))?;
    Ok(okm.to_vec())
}

fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}
