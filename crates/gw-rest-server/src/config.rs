// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server configuration

use gw_naver::ChzzkConfig;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:7949";
pub const DEFAULT_DATABASE_PATH: &str = "guny-world.db";
pub const DEFAULT_NAVER_REDIRECT_URI: &str = "https://game.gunynote.com/naver/callback";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,

    /// Path to SQLite database, or `:memory:`
    pub database_path: String,

    /// Host of the frontend; the allowed CORS origin is `http://<server_ip>:3000`
    pub server_ip: Option<String>,

    /// Allow any origin (development only)
    pub enable_cors: bool,

    /// Token signing configuration
    pub jwt: JwtConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Naver login; disabled when `None`
    pub naver: Option<NaverConfig>,

    /// chzzk API client settings
    pub chzzk: ChzzkConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.parse().expect("valid socket address"),
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            server_ip: None,
            enable_cors: false,
            jwt: JwtConfig::default(),
            rate_limit: RateLimitConfig::default(),
            naver: None,
            chzzk: ChzzkConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Origins accepted by the strict CORS policy
    pub fn cors_origins(&self) -> Vec<String> {
        match &self.server_ip {
            Some(ip) => vec![format!("http://{ip}:3000")],
            None => vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

/// JWT signing configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC secret shared by every token
    pub secret: String,

    pub issuer: String,

    pub access_ttl: Duration,

    pub refresh_ttl: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            issuer: "flexible-quest".to_string(),
            access_ttl: Duration::from_secs(60 * 60),
            refresh_ttl: Duration::from_secs(72 * 60 * 60),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &gw_logging::redact(&self.secret))
            .field("issuer", &self.issuer)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Requests per minute per client; 0 disables limiting
    pub requests_per_minute: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 60,
        }
    }
}

/// Naver login application credentials
#[derive(Clone)]
pub struct NaverConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl Default for NaverConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: DEFAULT_NAVER_REDIRECT_URI.to_string(),
        }
    }
}

impl std::fmt::Debug for NaverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NaverConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &gw_logging::redact(&self.client_secret))
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}
