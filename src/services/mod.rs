// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod accounts;
pub mod scoring;
pub mod twitter;

pub use accounts::{demo_login, ensure_fan_score, upsert_twitter_user, LoginOutcome};
pub use scoring::{generate_fan_score, random_fan_score};
pub use twitter::{TwitterClient, TwitterProfile};
