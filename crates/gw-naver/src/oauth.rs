// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Naver login (OAuth 2.0 authorization code flow)

use crate::error::{Error, Result};
use crate::{decode_json, endpoint};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_AUTH_BASE_URL: &str = "https://nid.naver.com";
pub const DEFAULT_API_BASE_URL: &str = "https://openapi.naver.com";

#[derive(Debug, Clone)]
pub struct NaverOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Host of `/oauth2.0/token`
    pub auth_base_url: Url,
    /// Host of `/v1/nid/me`
    pub api_base_url: Url,
    pub request_timeout: Duration,
}

impl NaverOAuthConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            auth_base_url: Url::parse(DEFAULT_AUTH_BASE_URL).expect("valid naver auth url"),
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).expect("valid naver api url"),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Token endpoint response
///
/// Naver answers 200 even for failures and reports them in `error`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NaverToken {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_type: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NaverUserProfile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile_image: String,
}

#[derive(Debug, Deserialize)]
struct ProfileEnvelope {
    response: Option<NaverUserProfile>,
}

#[derive(Debug, Clone)]
pub struct NaverOAuthClient {
    http_client: HttpClient,
    config: NaverOAuthConfig,
}

impl NaverOAuthClient {
    pub fn new(config: NaverOAuthConfig) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(Error::ClientBuild)?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Exchange an authorization code for an access token
    pub async fn exchange_code(&self, code: &str, state: &str) -> Result<String> {
        let url = endpoint(&self.config.auth_base_url, &["oauth2.0", "token"])?;
        let form = [
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("code", code),
            ("state", state),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        let response = self
            .http_client
            .post(url.clone())
            .form(&form)
            .send()
            .await
            .map_err(|source| Error::Http {
                url: url.to_string(),
                source,
            })?;
        let token: NaverToken = decode_json(response).await?;

        if let Some(error) = token.error.filter(|e| !e.is_empty()) {
            let description = token.error_description.unwrap_or_default();
            warn!(%error, %description, "naver token exchange rejected");
            return Err(Error::OAuth(if description.is_empty() {
                error
            } else {
                description
            }));
        }

        debug!(token_type = ?token.token_type, "naver token issued");
        token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::OAuth("token response carried no access token".to_string()))
    }

    /// Fetch the profile of the user who granted `access_token`
    pub async fn fetch_profile(&self, access_token: &str) -> Result<NaverUserProfile> {
        let url = endpoint(&self.config.api_base_url, &["v1", "nid", "me"])?;
        let response = self
            .http_client
            .get(url.clone())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|source| Error::Http {
                url: url.to_string(),
                source,
            })?;
        let envelope: ProfileEnvelope = decode_json(response).await?;

        let profile = envelope
            .response
            .ok_or_else(|| Error::OAuth("profile response was empty".to_string()))?;
        if profile.email.is_empty() {
            return Err(Error::OAuth("profile has no email address".to_string()));
        }
        Ok(profile)
    }
}
