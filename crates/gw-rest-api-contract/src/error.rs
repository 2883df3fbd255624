// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for API contract validation

use thiserror::Error;

/// Request validation failures
///
/// The display strings are returned to clients verbatim as the problem detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiContractError {
    #[error("user id is missing")]
    MissingUserId,

    #[error("password is missing")]
    MissingPassword,

    #[error("nickname is missing")]
    MissingNickname,

    #[error("user id must be a valid email address")]
    InvalidEmail,

    #[error("password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("nickname must be at most {max_chars} characters ({max_bytes} bytes)")]
    NicknameTooLong { max_chars: usize, max_bytes: usize },

    #[error("channel id is missing")]
    MissingChannelId,

    #[error("missing query parameter: {0}")]
    MissingQueryParameter(&'static str),
}

/// Problem+JSON error response format as per RFC 7807
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub detail: String,
    #[serde(skip_serializing_if = "std::collections::HashMap::is_empty", default)]
    pub errors: std::collections::HashMap<String, Vec<String>>,
}
