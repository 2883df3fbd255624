// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! SQLite storage for guny-world accounts
//!
//! Two tables live here: `users` for id/password registrations and
//! `naver_user_info` for accounts created through Naver login. The
//! [`Database`] handle owns a single connection behind a mutex; each store
//! borrows it for the duration of one statement.

mod database;
mod error;
mod naver_users;
mod users;

pub use database::Database;
pub use error::{Error, Result};
pub use naver_users::{NaverProfile, NaverUserStore, UpsertOutcome};
pub use users::{NewUser, UserCredentials, UserStore};
