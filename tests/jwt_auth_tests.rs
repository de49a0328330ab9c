// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT session tests.
//!
//! These tests verify that session tokens minted at login use the claim
//! layout and algorithm the auth middleware expects.

use fanscore_hub::middleware::auth::{create_jwt, verify_jwt, Claims, SESSION_TTL_SECS};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::{SystemTime, UNIX_EPOCH};

const SIGNING_KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

#[test]
fn test_jwt_claims_layout() {
    let token = create_jwt(12345678, SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(&token, &key, &validation)
        .expect("Failed to decode JWT - check Claims struct compatibility");

    assert_eq!(token_data.claims.sub, "12345678");
    assert!(token_data.claims.exp > token_data.claims.iat);
}

#[test]
fn test_jwt_expiration_is_one_day() {
    let token = create_jwt(1, SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false; // We'll check manually
    let claims = decode::<Claims>(&token, &key, &validation).unwrap().claims;

    let ttl = claims.exp - claims.iat;
    assert_eq!(ttl, SESSION_TTL_SECS as usize);
    assert!(claims.exp > now());
}

#[test]
fn test_expired_token_rejected() {
    let claims = Claims {
        sub: "1".to_string(),
        iat: now() - 2 * 86400,
        exp: now() - 86400,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SIGNING_KEY),
    )
    .unwrap();

    assert_eq!(verify_jwt(&token, SIGNING_KEY), None);
}

#[test]
fn test_non_numeric_subject_rejected() {
    let claims = Claims {
        sub: "alice".to_string(),
        iat: now(),
        exp: now() + 3600,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SIGNING_KEY),
    )
    .unwrap();

    assert_eq!(verify_jwt(&token, SIGNING_KEY), None);
}

#[test]
fn test_other_algorithm_rejected() {
    let claims = Claims {
        sub: "1".to_string(),
        iat: now(),
        exp: now() + 3600,
    };
    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(SIGNING_KEY),
    )
    .unwrap();

    assert_eq!(verify_jwt(&token, SIGNING_KEY), None);
}
