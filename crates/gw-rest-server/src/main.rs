// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! guny-world REST API server binary

use clap::Parser;
use gw_logging::CliLoggingArgs;
use gw_rest_server::config::{
    DEFAULT_BIND_ADDR, DEFAULT_DATABASE_PATH, DEFAULT_NAVER_REDIRECT_URI, JwtConfig, NaverConfig,
    RateLimitConfig,
};
use gw_rest_server::{Server, ServerConfig};
use std::net::SocketAddr;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bind address for the server
    #[arg(short, long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    bind: SocketAddr,

    /// Database path (SQLite), or `:memory:`
    #[arg(short, long, env = "DATABASE_PATH", default_value = DEFAULT_DATABASE_PATH)]
    database: String,

    /// Frontend host; CORS allows `http://<ip>:3000`
    #[arg(long, env = "SERVER_IP")]
    server_ip: Option<String>,

    /// Allow any CORS origin (development only)
    #[arg(long)]
    cors: bool,

    /// HMAC secret for access and refresh tokens
    #[arg(long, env = "JWT_SECRET_TOKEN", hide_env_values = true)]
    jwt_secret: String,

    /// Naver login client id
    #[arg(long, env = "NAVER_CLIENT_ID")]
    naver_client_id: Option<String>,

    /// Naver login client secret
    #[arg(long, env = "NAVER_CLIENT_SECRET", hide_env_values = true)]
    naver_client_secret: Option<String>,

    /// Redirect URI registered with Naver
    #[arg(long, env = "NAVER_REDIRECT_URI", default_value = DEFAULT_NAVER_REDIRECT_URI)]
    naver_redirect_uri: String,

    /// Requests per minute allowed per client (0 disables limiting)
    #[arg(long, default_value_t = RateLimitConfig::default().requests_per_minute)]
    rate_limit_per_minute: u64,

    #[command(flatten)]
    logging: CliLoggingArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    args.logging.init("gw-rest-server")?;

    info!("Starting guny-world REST API server");

    let naver = match (args.naver_client_id, args.naver_client_secret) {
        (Some(client_id), Some(client_secret)) => Some(NaverConfig {
            client_id,
            client_secret,
            redirect_uri: args.naver_redirect_uri,
        }),
        (None, None) => None,
        _ => {
            warn!("Naver login needs both a client id and a client secret; disabling it");
            None
        }
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        database_path: args.database,
        server_ip: args.server_ip,
        enable_cors: args.cors,
        jwt: JwtConfig {
            secret: args.jwt_secret,
            ..Default::default()
        },
        rate_limit: RateLimitConfig {
            requests_per_minute: args.rate_limit_per_minute,
        },
        naver,
        ..Default::default()
    };

    let server = Server::new(config).await?;
    server.run().await?;

    Ok(())
}
