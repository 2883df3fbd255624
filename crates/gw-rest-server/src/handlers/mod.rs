// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Request handlers

pub mod chzzk;
pub mod health;
pub mod login;
pub mod naver;
pub mod register;
pub mod reissue;
pub mod user_info;

use crate::error::{ServerError, ServerResult};

/// Run CPU-bound work (password hashing) off the async workers
pub(crate) async fn blocking<T, F>(f: F) -> ServerResult<T>
where
    F: FnOnce() -> ServerResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| ServerError::Internal(format!("blocking task failed: {err}")))?
}
