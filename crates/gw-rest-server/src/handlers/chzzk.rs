// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use crate::error::ServerResult;
use crate::extract::ApiJson;
use crate::state::AppState;
use axum::{Json, extract::State};
use gw_naver::{ChzzkSession, FollowRelations};
use gw_rest_api_contract::validation::validate_chzzk_request;
use gw_rest_api_contract::{ChzzkFollowRequest, FollowRelationsResponse};
use tracing::info;

/// `POST /api/chzzk`
pub async fn follow_relations(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ChzzkFollowRequest>,
) -> ServerResult<Json<FollowRelationsResponse>> {
    validate_chzzk_request(&request)?;

    let channel_id = request.id.trim();
    let session = ChzzkSession::new(request.nid_aut.clone(), request.nid_ses.clone());
    let relations = state.chzzk.follow_relations(&session, channel_id).await?;

    info!(
        channel_id,
        mutual = relations.mutual_follows.len(),
        only_followers = relations.only_followers.len(),
        only_following = relations.only_following.len(),
        "computed follow relations"
    );
    Ok(Json(to_response(relations)))
}

fn to_response(relations: FollowRelations) -> FollowRelationsResponse {
    FollowRelationsResponse {
        followers: relations.followers,
        followings: relations.followings,
        mutual_follows: relations.mutual_follows,
        only_followers: relations.only_followers,
        only_following: relations.only_following,
    }
}
