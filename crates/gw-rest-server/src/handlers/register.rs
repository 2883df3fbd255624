// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use super::blocking;
use crate::auth::hash_password;
use crate::error::{ServerError, ServerResult};
use crate::extract::ApiJson;
use crate::state::AppState;
use axum::{Json, extract::State};
use gw_local_db::NewUser;
use gw_rest_api_contract::validation::{validate_register_fields, validate_register_format};
use gw_rest_api_contract::{MessageResponse, RegisterRequest};
use tracing::info;

/// `POST /api/register`
///
/// Presence checks run before the duplicate lookup, format checks after it.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> ServerResult<Json<MessageResponse>> {
    validate_register_fields(&request)?;

    if state.db().users().count_by_user_id(&request.user_id)? > 0 {
        return Err(ServerError::UserExists(request.user_id));
    }

    validate_register_format(&request)?;

    let password = request.password;
    let password_hash = blocking(move || hash_password(&password)).await?;

    let id = state.db().users().insert_user(&NewUser {
        user_id: request.user_id.clone(),
        password_hash,
        nickname: request.nickname,
    })?;

    info!(user_id = %request.user_id, id, "user registered");
    Ok(Json(MessageResponse::new("registration succeeded")))
}
