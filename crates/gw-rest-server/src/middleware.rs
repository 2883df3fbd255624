// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Custom middleware

use crate::config::RateLimitConfig;
use crate::error::ServerError;
use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::time::Duration;

/// Headers the limiter sets on a rejection that survive the rewrite
const RETRY_HEADERS: [&str; 2] = ["retry-after", "x-ratelimit-after"];

/// Token bucket for a client: one request restored per interval, bursting up to
/// `requests_per_minute`. `None` when limiting is disabled.
pub fn rate_limit_quota(config: &RateLimitConfig) -> Option<(Duration, u32)> {
    if config.requests_per_minute == 0 {
        return None;
    }
    let burst = u32::try_from(config.requests_per_minute).unwrap_or(u32::MAX);
    let interval_ms = (60_000 / config.requests_per_minute).max(1);
    Some((Duration::from_millis(interval_ms), burst))
}

/// Rewrite the limiter's plain-text 429 as a problem document
pub async fn rate_limit_problem(response: Response) -> Response {
    if response.status() != StatusCode::TOO_MANY_REQUESTS
        || response.headers().get(header::CONTENT_TYPE)
            == Some(&header::HeaderValue::from_static("application/json"))
    {
        return response;
    }

    let mut problem = ServerError::RateLimited.into_response();
    for name in RETRY_HEADERS {
        if let Some(value) = response.headers().get(name) {
            problem.headers_mut().insert(name, value.clone());
        }
    }
    problem
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};

    #[test]
    fn quota_spreads_the_minute_over_the_budget() {
        let quota = rate_limit_quota(&RateLimitConfig {
            requests_per_minute: 60,
        });
        assert_eq!(quota, Some((Duration::from_secs(1), 60)));

        let quota = rate_limit_quota(&RateLimitConfig {
            requests_per_minute: 120_000,
        });
        assert_eq!(quota, Some((Duration::from_millis(1), 120_000)));
    }

    #[test]
    fn zero_budget_disables_limiting() {
        assert_eq!(
            rate_limit_quota(&RateLimitConfig {
                requests_per_minute: 0
            }),
            None
        );
    }

    #[tokio::test]
    async fn limiter_rejection_becomes_a_problem() {
        let rejection = Response::builder()
            .status(StatusCode::TOO_MANY_REQUESTS)
            .header("retry-after", "30")
            .body(Body::from("Too Many Requests! Wait for 30s"))
            .unwrap();

        let response = rate_limit_problem(rejection).await;
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()["retry-after"], "30");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["title"], "Rate Limited");
        assert_eq!(body["status"], 429);
    }

    #[tokio::test]
    async fn other_responses_pass_through() {
        let ok = Response::builder()
            .status(StatusCode::OK)
            .body(Body::from("fine"))
            .unwrap();
        let response = rate_limit_problem(ok).await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"fine");
    }
}
