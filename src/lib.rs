// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fan Score Hub: engagement scores and tier benefits for esports fans
//!
//! This crate provides the backend API: Twitter and demo login, per-user
//! fan scores, tier classification and score feedback.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::MemoryDb;
use services::TwitterClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MemoryDb,
    /// `None` when Twitter credentials are not configured.
    pub twitter: Option<TwitterClient>,
}

impl AppState {
    /// Build state from config with a fresh, empty store.
    pub fn new(config: Config) -> Self {
        let twitter = config
            .twitter
            .as_ref()
            .map(|c| TwitterClient::new(c.client_id.clone(), c.client_secret.clone()));
        Self {
            config,
            db: MemoryDb::new(),
            twitter,
        }
    }
}
