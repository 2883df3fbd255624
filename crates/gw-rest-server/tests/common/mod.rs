// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::ConnectInfo,
    http::{Method, Request, StatusCode, header},
};
use gw_naver::NaverOAuthClient;
use gw_rest_server::{
    Server, ServerConfig,
    auth::TokenIssuer,
    config::JwtConfig,
    dependencies::{DefaultServerDependencies, FollowRelationsSource, open_database},
    state::AppState,
};
use serde_json::{Value, json};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tower::ServiceExt;
use url::Url;

pub const JWT_SECRET: &str = "integration-test-secret";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        database_path: ":memory:".to_string(),
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Router built from the default dependencies
pub async fn default_app(config: ServerConfig) -> Router {
    let state = DefaultServerDependencies::new(config.clone())
        .await
        .expect("dependencies")
        .into_state();
    Server::build_app(state, &config)
}

/// State with injected upstream clients
pub fn custom_state(
    config: &ServerConfig,
    chzzk: Arc<dyn FollowRelationsSource>,
    naver: Option<NaverOAuthClient>,
) -> AppState {
    AppState {
        db: Arc::new(open_database(&config.database_path).expect("database")),
        config: config.clone(),
        tokens: TokenIssuer::new(&config.jwt).expect("token issuer"),
        chzzk,
        naver: naver.map(Arc::new),
    }
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn get_request(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).expect("request")
}

/// Attach the TCP peer address the server would see for this request
pub fn from_peer(mut request: Request<Body>, ip: Ipv4Addr) -> Request<Body> {
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from((ip, 50000))));
    request
}

/// Requests without an explicit peer come from loopback
pub fn with_default_peer(request: Request<Body>) -> Request<Body> {
    if request.extensions().get::<ConnectInfo<SocketAddr>>().is_some() {
        return request;
    }
    from_peer(request, Ipv4Addr::LOCALHOST)
}

/// Send one request through the router and decode the JSON body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let request = with_default_peer(request);
    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

pub async fn register(app: &Router, user_id: &str, password: &str, nickname: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            Method::POST,
            "/api/register",
            json!({ "user_id": user_id, "password": password, "nickname": nickname }),
        ),
    )
    .await
}

pub async fn login(app: &Router, user_id: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            Method::POST,
            "/api/login",
            json!({ "user_id": user_id, "password": password }),
        ),
    )
    .await
}

/// Serve `router` on an ephemeral port and return its base URL
pub async fn spawn_upstream(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("upstream");
    });
    Url::parse(&format!("http://{addr}")).expect("url")
}
