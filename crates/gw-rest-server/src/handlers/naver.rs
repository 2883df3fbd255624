// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use gw_local_db::{NaverProfile, UpsertOutcome};
use gw_rest_api_contract::{ApiContractError, NaverCallbackQuery, TokenPairResponse};
use tracing::info;

/// `GET /api/naver/callback`
///
/// Completes Naver login: exchanges the authorization code, stores the
/// profile keyed by email and issues tokens for that email.
pub async fn callback(
    State(state): State<AppState>,
    query: Result<Query<NaverCallbackQuery>, QueryRejection>,
) -> ServerResult<Json<TokenPairResponse>> {
    let Query(query) = query.map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;
    let code = required(query.code, "code")?;
    let oauth_state = required(query.state, "state")?;

    let client = state
        .naver
        .as_ref()
        .ok_or_else(|| ServerError::Unavailable("Naver login is not configured".to_string()))?;

    let access_token = client.exchange_code(&code, &oauth_state).await?;
    let profile = client.fetch_profile(&access_token).await?;

    let outcome = state.db().naver_users().upsert(&NaverProfile {
        email: profile.email.clone(),
        nickname: profile.nickname,
        profile_image: profile.profile_image,
        name: profile.name,
    })?;
    match outcome {
        UpsertOutcome::Inserted => info!(email = %profile.email, "naver user created"),
        UpsertOutcome::Updated => info!(email = %profile.email, "naver user refreshed"),
    }

    let pair = state.tokens.issue_pair(&profile.email)?;
    Ok(Json(pair.into_body(None)))
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ApiContractError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ApiContractError::MissingQueryParameter(name))
}
