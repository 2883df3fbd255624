// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use crate::database::Database;
use crate::error::Result;
use rusqlite::{OptionalExtension, params};
use tracing::debug;

/// Profile fields persisted for a Naver-login account, keyed by email
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NaverProfile {
    pub email: String,
    pub nickname: String,
    pub profile_image: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Queries over the `naver_user_info` table
pub struct NaverUserStore<'db> {
    db: &'db Database,
}

impl<'db> NaverUserStore<'db> {
    pub(crate) fn new(db: &'db Database) -> Self {
        Self { db }
    }

    pub fn nickname_by_user_id(&self, user_id: &str) -> Result<Option<String>> {
        self.db.with_conn(|conn| {
            let nickname: Option<String> = conn
                .query_row(
                    "SELECT nickname FROM naver_user_info WHERE user_id = ?1",
                    params![user_id],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(nickname)
        })
    }

    /// Insert a new account or refresh an existing one
    ///
    /// `created_at` is set on insert only, `updated_at` on update only.
    pub fn upsert(&self, profile: &NaverProfile) -> Result<UpsertOutcome> {
        let now = chrono::Utc::now().to_rfc3339();
        self.db.with_conn(|conn| {
            let existing: Option<String> = conn
                .query_row(
                    "SELECT user_id FROM naver_user_info WHERE user_id = ?1",
                    params![profile.email],
                    |row| row.get(0),
                )
                .optional()?;

            let outcome = if existing.is_some() {
                conn.execute(
                    "UPDATE naver_user_info SET nickname = ?1, profile_image = ?2, name = ?3, updated_at = ?4 WHERE user_id = ?5",
                    params![profile.nickname, profile.profile_image, profile.name, now, profile.email],
                )?;
                UpsertOutcome::Updated
            } else {
                conn.execute(
                    "INSERT INTO naver_user_info (user_id, nickname, profile_image, name, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![profile.email, profile.nickname, profile.profile_image, profile.name, now],
                )?;
                UpsertOutcome::Inserted
            };

            debug!(outcome = ?outcome, "stored naver profile");
            Ok(outcome)
        })
    }
}
