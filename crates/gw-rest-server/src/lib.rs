// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! guny-world REST API server
//!
//! Account registration and login with JWT access/refresh tokens, Naver
//! login, and the chzzk follower/following comparison used by the game
//! frontend. Every route lives under `/api`.

pub mod auth;
pub mod config;
pub mod dependencies;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::Server;
