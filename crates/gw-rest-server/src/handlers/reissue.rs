// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use crate::auth::TokenKind;
use crate::error::ServerResult;
use crate::extract::ApiJson;
use crate::state::AppState;
use axum::{Json, extract::State};
use gw_rest_api_contract::{ReissueRequest, TokenPairResponse};
use tracing::debug;

/// `POST /api/reissue`
///
/// Trades a valid refresh token for a fresh pair. Old tokens stay valid until
/// they expire.
pub async fn reissue(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ReissueRequest>,
) -> ServerResult<Json<TokenPairResponse>> {
    let claims = state
        .tokens
        .validate(&request.refresh_token, TokenKind::Refresh)?;

    let pair = state.tokens.issue_pair(&claims.user_id)?;
    debug!(user_id = %claims.user_id, "tokens reissued");
    Ok(Json(pair.into_body(Some("tokens reissued"))))
}
