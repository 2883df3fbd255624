// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server state management

use crate::auth::TokenIssuer;
use crate::config::ServerConfig;
use crate::dependencies::FollowRelationsSource;
use gw_local_db::Database;
use gw_naver::NaverOAuthClient;
use std::sync::Arc;

/// Shared server state
#[derive(Clone)]
pub struct AppState {
    /// Database connection
    pub db: Arc<Database>,

    /// Server configuration
    pub config: ServerConfig,

    /// JWT signing and validation
    pub tokens: TokenIssuer,

    /// chzzk follow graph lookup
    pub chzzk: Arc<dyn FollowRelationsSource>,

    /// Naver login client; `None` when not configured
    pub naver: Option<Arc<NaverOAuthClient>>,
}

impl AppState {
    /// Get database reference
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Get configuration reference
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
