// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use super::blocking;
use crate::auth::{verify_password, verify_unknown_user};
use crate::error::{ServerError, ServerResult};
use crate::extract::ApiJson;
use crate::state::AppState;
use axum::{Json, extract::State};
use gw_rest_api_contract::{LoginRequest, TokenPairResponse};
use tracing::{debug, info};

/// Same message for unknown users and wrong passwords
const BAD_CREDENTIALS: &str = "invalid user id or password";

/// `POST /api/login`
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ServerResult<Json<TokenPairResponse>> {
    let Some(credentials) = state.db().users().credentials_by_user_id(&request.user_id)? else {
        // Unknown accounts pay the same hashing cost as wrong passwords
        let password = request.password;
        blocking(move || Ok(verify_unknown_user(&password))).await?;
        debug!(user_id = %request.user_id, "login for unknown user");
        return Err(ServerError::Auth(BAD_CREDENTIALS.to_string()));
    };

    let password = request.password;
    let password_hash = credentials.password_hash;
    let verified = blocking(move || Ok(verify_password(&password, &password_hash))).await?;
    if !verified {
        debug!(user_id = %request.user_id, "login with wrong password");
        return Err(ServerError::Auth(BAD_CREDENTIALS.to_string()));
    }

    let pair = state.tokens.issue_pair(&credentials.id.to_string())?;
    info!(user_id = %request.user_id, id = credentials.id, "user logged in");
    Ok(Json(pair.into_body(Some("Success login!"))))
}
