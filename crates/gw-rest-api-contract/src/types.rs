// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Request and response bodies

use serde::{Deserialize, Serialize};

/// `POST /api/register`
///
/// Missing fields deserialize as empty strings so that validation, not the
/// JSON extractor, reports which one is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub user_id: String,
    pub password: String,
    pub nickname: String,
}

/// `POST /api/login`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}

/// `POST /api/reissue`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReissueRequest {
    pub refresh_token: String,
}

/// Access/refresh token pair returned by login, reissue and Naver login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairResponse {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `GET /api/user_info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfoResponse {
    pub nickname: String,
}

/// `POST /api/chzzk`
///
/// `NID_AUT` and `NID_SES` are the Naver session cookies of the channel owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChzzkFollowRequest {
    #[serde(rename = "NID_AUT")]
    pub nid_aut: String,
    #[serde(rename = "NID_SES")]
    pub nid_ses: String,
    pub id: String,
}

/// Follower/following breakdown for a chzzk channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRelationsResponse {
    pub followers: Vec<String>,
    pub followings: Vec<String>,
    pub mutual_follows: Vec<String>,
    pub only_followers: Vec<String>,
    pub only_following: Vec<String>,
}

/// Query string of `GET /api/naver/callback`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaverCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn register_request_tolerates_missing_fields() {
        let request: RegisterRequest =
            serde_json::from_value(json!({ "user_id": "a@b.io" })).unwrap();
        assert_eq!(request.user_id, "a@b.io");
        assert!(request.password.is_empty());
        assert!(request.nickname.is_empty());
    }

    #[test]
    fn token_pair_uses_camel_case_keys() {
        let body = serde_json::to_value(TokenPairResponse {
            message: None,
            access_token: "a".into(),
            refresh_token: "r".into(),
        })
        .unwrap();
        assert_eq!(body, json!({ "accessToken": "a", "refreshToken": "r" }));
    }

    #[test]
    fn chzzk_request_reads_cookie_names() {
        let request: ChzzkFollowRequest = serde_json::from_value(json!({
            "NID_AUT": "aut",
            "NID_SES": "ses",
            "id": "channel"
        }))
        .unwrap();
        assert_eq!(request.nid_aut, "aut");
        assert_eq!(request.nid_ses, "ses");
        assert_eq!(request.id, "channel");
    }

    #[test]
    fn relations_serialize_empty_lists() {
        let body = serde_json::to_value(FollowRelationsResponse::default()).unwrap();
        assert_eq!(body["mutualFollows"], json!([]));
        assert_eq!(body["onlyFollowing"], json!([]));
    }
}
