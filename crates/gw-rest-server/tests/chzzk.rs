// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! `POST /api/chzzk` against a mock chzzk API and an injected failing source

mod common;

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{Path, Query},
    http::{HeaderMap, Method, StatusCode, header},
    routing::get,
};
use common::*;
use gw_naver::{ChzzkSession, FollowRelations};
use gw_rest_server::{Server, dependencies::FollowRelationsSource};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

async fn followers(
    Path(channel): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let cookie = headers.get(header::COOKIE).and_then(|v| v.to_str().ok());
    if cookie != Some("NID_AUT=aut; NID_SES=ses") || channel != "streamer-channel" {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "code": 401, "content": null })));
    }
    let body = match query.get("page").map(String::as_str) {
        Some("0") => json!({ "content": { "data": [
            { "user": { "nickname": "alice" } },
            { "user": { "nickname": "bob" } }
        ]}}),
        _ => json!({ "content": { "data": [] } }),
    };
    (StatusCode::OK, Json(body))
}

async fn followings(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    match query.get("page").map(String::as_str) {
        Some("0") => Json(json!({ "content": { "followingList": [
            { "channel": { "channelName": "alice" } },
            { "channel": { "channelName": "dave" } }
        ]}})),
        _ => Json(json!({ "content": { "followingList": [] } })),
    }
}

async fn chzzk_app() -> Router {
    let upstream = Router::new()
        .route("/manage/v1/channels/:id/followers", get(followers))
        .route("/service/v1/channels/followings", get(followings));
    let base_url = spawn_upstream(upstream).await;

    let mut config = test_config();
    config.chzzk.base_url = base_url;
    default_app(config).await
}

fn chzzk_request(nid_aut: &str, nid_ses: &str, id: &str) -> axum::http::Request<axum::body::Body> {
    json_request(
        Method::POST,
        "/api/chzzk",
        json!({ "NID_AUT": nid_aut, "NID_SES": nid_ses, "id": id }),
    )
}

#[tokio::test]
async fn follow_relations_from_upstream() {
    let app = chzzk_app().await;

    let (status, body) = send(&app, chzzk_request("aut", "ses", "streamer-channel")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "followers": ["alice", "bob"],
            "followings": ["alice", "dave"],
            "mutualFollows": ["alice"],
            "onlyFollowers": ["bob"],
            "onlyFollowing": ["dave"]
        })
    );
}

#[tokio::test]
async fn channel_id_is_trimmed() {
    let app = chzzk_app().await;

    let (status, body) = send(&app, chzzk_request("aut", "ses", "  streamer-channel ")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mutualFollows"], json!(["alice"]));
}

#[tokio::test]
async fn rejected_cookies_are_a_bad_gateway() {
    let app = chzzk_app().await;

    let (status, body) = send(&app, chzzk_request("stale", "cookies", "streamer-channel")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["title"], "Upstream Request Failed");
}

#[tokio::test]
async fn missing_channel_id_is_rejected() {
    let app = chzzk_app().await;

    let (status, body) = send(&app, chzzk_request("aut", "ses", "   ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "channel id is missing");

    let (status, _) = send(
        &app,
        json_request(Method::POST, "/api/chzzk", json!({ "NID_AUT": "aut" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

struct EmptyChannel;

#[async_trait]
impl FollowRelationsSource for EmptyChannel {
    async fn follow_relations(
        &self,
        _session: &ChzzkSession,
        _channel_id: &str,
    ) -> gw_naver::Result<FollowRelations> {
        Ok(FollowRelations::default())
    }
}

#[tokio::test]
async fn empty_lists_serialize_as_arrays() {
    let config = test_config();
    let state = custom_state(&config, Arc::new(EmptyChannel), None);
    let app = Server::build_app(state, &config);

    let (status, body) = send(&app, chzzk_request("aut", "ses", "quiet-channel")).await;
    assert_eq!(status, StatusCode::OK);
    for key in ["followers", "followings", "mutualFollows", "onlyFollowers", "onlyFollowing"] {
        assert_eq!(body[key], json!([]), "{key}");
    }
}
