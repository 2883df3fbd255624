// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use crate::error::{ServerError, ServerResult};
use crate::extract::AuthenticatedUser;
use crate::state::AppState;
use axum::{Json, extract::State};
use gw_rest_api_contract::UserInfoResponse;

/// `GET /api/user_info`
///
/// Password accounts carry their numeric row id, Naver accounts their email.
pub async fn user_info(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ServerResult<Json<UserInfoResponse>> {
    let local = match user.user_id.parse::<i64>() {
        Ok(id) => state.db().users().nickname_by_id(id)?,
        Err(_) => None,
    };

    let nickname = match local {
        Some(nickname) => nickname,
        None => state
            .db()
            .naver_users()
            .nickname_by_user_id(&user.user_id)?
            .ok_or_else(|| ServerError::NotFound("user not found".to_string()))?,
    };

    Ok(Json(UserInfoResponse { nickname }))
}
