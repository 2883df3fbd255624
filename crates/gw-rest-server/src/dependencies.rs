// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Dependency wiring for the REST server

use crate::{auth::TokenIssuer, config::ServerConfig, state::AppState};
use anyhow::{Context, Result};
use async_trait::async_trait;
use gw_local_db::Database;
use gw_naver::{ChzzkClient, ChzzkSession, FollowRelations, NaverOAuthClient, NaverOAuthConfig};
use std::sync::Arc;
use tracing::info;

/// Follow graph lookup that can be injected into handlers
#[async_trait]
pub trait FollowRelationsSource: Send + Sync {
    async fn follow_relations(
        &self,
        session: &ChzzkSession,
        channel_id: &str,
    ) -> gw_naver::Result<FollowRelations>;
}

#[async_trait]
impl FollowRelationsSource for ChzzkClient {
    async fn follow_relations(
        &self,
        session: &ChzzkSession,
        channel_id: &str,
    ) -> gw_naver::Result<FollowRelations> {
        ChzzkClient::follow_relations(self, session, channel_id).await
    }
}

/// Open the configured database, `:memory:` meaning a private in-memory one
pub fn open_database(path: &str) -> Result<Database> {
    if path == ":memory:" {
        Ok(Database::open_in_memory()?)
    } else {
        Database::open(path).with_context(|| format!("failed to open database at {path}"))
    }
}

/// Default dependency builder: SQLite plus the live chzzk and Naver clients
pub struct DefaultServerDependencies {
    state: AppState,
}

impl DefaultServerDependencies {
    pub async fn new(config: ServerConfig) -> Result<Self> {
        let db = Arc::new(open_database(&config.database_path)?);
        let tokens = TokenIssuer::new(&config.jwt)?;

        let chzzk: Arc<dyn FollowRelationsSource> = Arc::new(ChzzkClient::new(config.chzzk.clone())?);

        let naver = match &config.naver {
            Some(naver) => {
                let client = NaverOAuthClient::new(NaverOAuthConfig::new(
                    naver.client_id.clone(),
                    naver.client_secret.clone(),
                    naver.redirect_uri.clone(),
                ))?;
                Some(Arc::new(client))
            }
            None => {
                info!("Naver login disabled: no client credentials configured");
                None
            }
        };

        let state = AppState {
            db,
            config,
            tokens,
            chzzk,
            naver,
        };

        Ok(Self { state })
    }

    /// Consume the dependency builder and return the resulting app state
    pub fn into_state(self) -> AppState {
        self.state
    }
}
