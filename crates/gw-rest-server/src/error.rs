// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server error types and handling

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gw_rest_api_contract::{ApiContractError, ProblemDetails};
use tracing::{error, warn};

/// Server result type
pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] gw_local_db::Error),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ApiContractError),

    #[error("User already exists: {0}")]
    UserExists(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Upstream error: {0}")]
    Upstream(#[from] gw_naver::Error),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Rate limited")]
    RateLimited,
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Database(gw_local_db::Error::UserExists(_)) | ServerError::UserExists(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::Database(_) | ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Auth(_) => StatusCode::UNAUTHORIZED,
            ServerError::Validation(_) | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ServerError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServerError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    /// Convert error to Problem+JSON response
    pub fn to_problem(&self) -> ProblemDetails {
        let (slug, title, detail) = match self {
            ServerError::Database(gw_local_db::Error::UserExists(user_id))
            | ServerError::UserExists(user_id) => (
                "user-exists",
                "User Already Exists",
                format!("user '{}' is already registered", user_id),
            ),
            // Storage internals stay in the logs
            ServerError::Database(_) => (
                "database",
                "Database Error",
                "Database operation failed".to_string(),
            ),
            ServerError::Auth(msg) => ("auth", "Authentication Failed", msg.clone()),
            ServerError::Validation(err) => ("validation", "Validation Error", err.to_string()),
            ServerError::NotFound(msg) => ("not-found", "Not Found", msg.clone()),
            ServerError::MethodNotAllowed => (
                "method-not-allowed",
                "Method Not Allowed",
                "method not allowed for this route".to_string(),
            ),
            ServerError::BadRequest(msg) => ("bad-request", "Bad Request", msg.clone()),
            ServerError::Upstream(err) => ("upstream", "Upstream Request Failed", err.to_string()),
            ServerError::Unavailable(msg) => ("unavailable", "Service Unavailable", msg.clone()),
            ServerError::Internal(_) => (
                "internal",
                "Internal Server Error",
                "Internal server error".to_string(),
            ),
            ServerError::RateLimited => (
                "rate-limited",
                "Rate Limited",
                "Too many requests".to_string(),
            ),
        };

        ProblemDetails {
            problem_type: format!("https://game.gunynote.com/errors/{slug}"),
            title: title.to_string(),
            status: Some(self.status().as_u16()),
            detail,
            errors: Default::default(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }

        let problem = self.to_problem();
        (status, Json(problem)).into_response()
    }
}

/// Convert any error to ServerError
impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

/// Convert IO errors
impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn status_codes() {
        assert_eq!(
            ServerError::Auth("Missing JWT".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServerError::Validation(ApiContractError::InvalidEmail).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::Database(gw_local_db::Error::UserExists("a@b.c".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::Database(gw_local_db::Error::LockPoisoned).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::Upstream(gw_naver::Error::OAuth("denied".into())).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ServerError::Unavailable("naver login".into()).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ServerError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn problem_carries_validation_message() {
        let problem = ServerError::Validation(ApiContractError::MissingNickname).to_problem();
        assert_eq!(problem.status, Some(400));
        assert_eq!(problem.detail, "nickname is missing");
        assert_eq!(problem.problem_type, "https://game.gunynote.com/errors/validation");
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let problem = ServerError::Internal("argon2 exploded".into()).to_problem();
        assert!(!problem.detail.contains("argon2"));
        assert_eq!(problem.status, Some(500));
    }

    #[traced_test]
    #[test]
    fn responses_are_logged_by_severity() {
        let response = ServerError::Auth("Missing JWT".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(logs_contain("request rejected"));

        let response = ServerError::Internal("disk full".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(logs_contain("request failed"));
    }
}
