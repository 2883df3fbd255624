// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! HTTP clients for Naver services
//!
//! - [`chzzk`]: scrapes a channel's followers and followings from the chzzk
//!   private API using the owner's Naver session cookies, then splits them
//!   into mutual and one-sided relationships ([`relations`]).
//! - [`oauth`]: the Naver login authorization-code exchange and profile fetch.
//!
//! Requests are strictly sequential and the first failure aborts the call.

pub mod chzzk;
pub mod error;
pub mod oauth;
pub mod relations;

pub use chzzk::{ChzzkClient, ChzzkConfig, ChzzkSession};
pub use error::{Error, Result};
pub use oauth::{NaverOAuthClient, NaverOAuthConfig, NaverToken, NaverUserProfile};
pub use relations::{FollowRelations, compute_relations};

use reqwest::Response;
use serde::de::DeserializeOwned;
use url::Url;

/// Append percent-encoded path segments to a base URL
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| Error::InvalidBaseUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Check the status, then decode the body as JSON
pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let url = response.url().to_string();
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status { url, status });
    }

    let text = response.text().await.map_err(|source| Error::Http {
        url: url.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| Error::Decode { url, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_and_encodes_segments() {
        let base = Url::parse("https://api.chzzk.naver.com").unwrap();
        let url = endpoint(&base, &["manage", "v1", "channels", "a b", "followers"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.chzzk.naver.com/manage/v1/channels/a%20b/followers"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let base = Url::parse("http://127.0.0.1:9000/proxy/").unwrap();
        let url = endpoint(&base, &["v1", "nid", "me"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/proxy/v1/nid/me");
    }

    #[test]
    fn endpoint_rejects_opaque_base() {
        let base = Url::parse("mailto:someone@example.com").unwrap();
        assert!(matches!(
            endpoint(&base, &["x"]),
            Err(Error::InvalidBaseUrl(_))
        ));
    }
}
