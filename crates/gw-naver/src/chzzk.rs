// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! chzzk follower/following scraper

use crate::error::{Error, Result};
use crate::relations::{FollowRelations, compute_relations};
use crate::{decode_json, endpoint};
use reqwest::{Client as HttpClient, header};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.chzzk.naver.com";

/// chzzk rejects the default reqwest agent, so a desktop browser is mimicked
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

#[derive(Debug, Clone)]
pub struct ChzzkConfig {
    pub base_url: Url,
    pub user_agent: String,
    /// Upper bound on follower pages requested
    pub follower_page_limit: u32,
    pub follower_page_size: u32,
    /// Upper bound on following pages requested
    pub following_page_limit: u32,
    pub following_page_size: u32,
    pub request_timeout: Duration,
}

impl Default for ChzzkConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("valid chzzk base url"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            follower_page_limit: 5,
            follower_page_size: 10_000,
            following_page_limit: 100,
            following_page_size: 500,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Naver session cookies of the channel owner
#[derive(Clone)]
pub struct ChzzkSession {
    pub nid_aut: String,
    pub nid_ses: String,
}

impl ChzzkSession {
    pub fn new(nid_aut: impl Into<String>, nid_ses: impl Into<String>) -> Self {
        Self {
            nid_aut: nid_aut.into(),
            nid_ses: nid_ses.into(),
        }
    }

    pub fn cookie_header(&self) -> String {
        format!("NID_AUT={}; NID_SES={}", self.nid_aut, self.nid_ses)
    }
}

impl std::fmt::Debug for ChzzkSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChzzkSession")
            .field("nid_aut", &"[REDACTED]")
            .field("nid_ses", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    content: Option<T>,
}

/// List entry that decodes to `None` instead of failing the whole page
#[derive(Debug)]
struct Lenient<T>(Option<T>);

impl<'de, T: DeserializeOwned> Deserialize<'de> for Lenient<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Lenient(serde_json::from_value(value).ok()))
    }
}

#[derive(Debug, Deserialize)]
struct FollowersContent {
    data: Option<Vec<Lenient<FollowerEntry>>>,
}

#[derive(Debug, Deserialize)]
struct FollowerEntry {
    user: Option<FollowerUser>,
}

#[derive(Debug, Deserialize)]
struct FollowerUser {
    nickname: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FollowingsContent {
    following_list: Option<Vec<Lenient<FollowingEntry>>>,
}

#[derive(Debug, Deserialize)]
struct FollowingEntry {
    channel: Option<FollowingChannel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FollowingChannel {
    channel_name: Option<String>,
}

/// Client for the chzzk channel management API
#[derive(Debug, Clone)]
pub struct ChzzkClient {
    http_client: HttpClient,
    config: ChzzkConfig,
}

impl ChzzkClient {
    pub fn new(config: ChzzkConfig) -> Result<Self> {
        let http_client = HttpClient::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .build()
            .map_err(Error::ClientBuild)?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &ChzzkConfig {
        &self.config
    }

    /// Fetch followers, then followings, and split them by reciprocity
    pub async fn follow_relations(
        &self,
        session: &ChzzkSession,
        channel_id: &str,
    ) -> Result<FollowRelations> {
        let followers = self.fetch_followers(session, channel_id).await?;
        let followings = self.fetch_followings(session).await?;
        info!(
            channel_id,
            followers = followers.len(),
            followings = followings.len(),
            "fetched chzzk follow lists"
        );
        Ok(compute_relations(followers, followings))
    }

    /// Nicknames of everyone following `channel_id`
    ///
    /// Stops at the first page without data or after `follower_page_limit` pages.
    pub async fn fetch_followers(
        &self,
        session: &ChzzkSession,
        channel_id: &str,
    ) -> Result<Vec<String>> {
        let url = endpoint(
            &self.config.base_url,
            &["manage", "v1", "channels", channel_id, "followers"],
        )?;
        let mut followers = Vec::new();

        for page in 0..self.config.follower_page_limit {
            let query = [
                ("page", page.to_string()),
                ("size", self.config.follower_page_size.to_string()),
                ("userNickname", String::new()),
            ];
            let body: Envelope<FollowersContent> = self.get(session, &url, &query).await?;

            let Some(entries) = body.content.and_then(|c| c.data).filter(|d| !d.is_empty())
            else {
                debug!(page, "no more follower pages");
                break;
            };
            followers.extend(
                entries
                    .into_iter()
                    .filter_map(|entry| entry.0.and_then(|e| e.user).and_then(|user| user.nickname)),
            );
        }

        Ok(followers)
    }

    /// Channel names the session owner follows
    pub async fn fetch_followings(&self, session: &ChzzkSession) -> Result<Vec<String>> {
        let url = endpoint(
            &self.config.base_url,
            &["service", "v1", "channels", "followings"],
        )?;
        let mut followings = Vec::new();

        for page in 0..self.config.following_page_limit {
            let query = [
                ("size", self.config.following_page_size.to_string()),
                ("page", page.to_string()),
            ];
            let body: Envelope<FollowingsContent> = self.get(session, &url, &query).await?;

            let Some(entries) = body
                .content
                .and_then(|c| c.following_list)
                .filter(|list| !list.is_empty())
            else {
                debug!(page, "no more following pages");
                break;
            };
            followings.extend(
                entries
                    .into_iter()
                    .filter_map(|entry| {
                        entry
                            .0
                            .and_then(|e| e.channel)
                            .and_then(|channel| channel.channel_name)
                    }),
            );
        }

        Ok(followings)
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        session: &ChzzkSession,
        url: &Url,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .http_client
            .get(url.clone())
            .query(query)
            .header(header::COOKIE, session.cookie_header())
            .send()
            .await
            .map_err(|source| Error::Http {
                url: url.to_string(),
                source,
            })?;

        decode_json(response).await
    }
}
