// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use crate::database::Database;
use crate::error::{Error, Result};
use rusqlite::{OptionalExtension, params};

/// Row to insert into `users`
///
/// `password_hash` must already be a PHC string; this crate never sees plaintext.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_id: String,
    pub password_hash: String,
    pub nickname: String,
}

/// What login needs to check a password and mint tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub id: i64,
    pub password_hash: String,
}

/// Queries over the `users` table
pub struct UserStore<'db> {
    db: &'db Database,
}

impl<'db> UserStore<'db> {
    pub(crate) fn new(db: &'db Database) -> Self {
        Self { db }
    }

    pub fn count_by_user_id(&self, user_id: &str) -> Result<i64> {
        self.db.with_conn(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM users WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
    }

    /// Insert a user and return its numeric id
    pub fn insert_user(&self, user: &NewUser) -> Result<i64> {
        let created_at = chrono::Utc::now().to_rfc3339();
        self.db.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT INTO users (user_id, password, nickname, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![user.user_id, user.password_hash, user.nickname, created_at],
            );
            match inserted {
                Ok(_) => Ok(conn.last_insert_rowid()),
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Err(Error::UserExists(user.user_id.clone()))
                }
                Err(err) => Err(err.into()),
            }
        })
    }

    pub fn credentials_by_user_id(&self, user_id: &str) -> Result<Option<UserCredentials>> {
        self.db.with_conn(|conn| {
            let credentials = conn
                .query_row(
                    "SELECT id, password FROM users WHERE user_id = ?1",
                    params![user_id],
                    |row| {
                        Ok(UserCredentials {
                            id: row.get(0)?,
                            password_hash: row.get(1)?,
                        })
                    },
                )
                .optional()?;
            Ok(credentials)
        })
    }

    /// Tokens carry the numeric id as a string; callers parse it first.
    pub fn nickname_by_id(&self, id: i64) -> Result<Option<String>> {
        self.db.with_conn(|conn| {
            let nickname: Option<String> = conn
                .query_row(
                    "SELECT nickname FROM users WHERE id = ?1",
                    params![id],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(nickname)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(user_id: &str) -> NewUser {
        NewUser {
            user_id: user_id.into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            nickname: "guny".into(),
        }
    }

    #[test]
    fn insert_then_lookup() {
        let db = Database::open_in_memory().unwrap();
        let users = db.users();

        assert_eq!(users.count_by_user_id("a@b.io").unwrap(), 0);
        let id = users.insert_user(&new_user("a@b.io")).unwrap();
        assert_eq!(users.count_by_user_id("a@b.io").unwrap(), 1);

        let credentials = users.credentials_by_user_id("a@b.io").unwrap().unwrap();
        assert_eq!(credentials.id, id);
        assert!(credentials.password_hash.starts_with("$argon2id$"));

        assert_eq!(users.nickname_by_id(id).unwrap().as_deref(), Some("guny"));
    }

    #[test]
    fn ids_are_sequential() {
        let db = Database::open_in_memory().unwrap();
        let first = db.users().insert_user(&new_user("one@b.io")).unwrap();
        let second = db.users().insert_user(&new_user("two@b.io")).unwrap();
        assert!(second > first);
    }

    #[test]
    fn duplicate_user_id_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.users().insert_user(&new_user("a@b.io")).unwrap();

        let err = db.users().insert_user(&new_user("a@b.io")).unwrap_err();
        assert!(matches!(err, Error::UserExists(id) if id == "a@b.io"));
    }

    #[test]
    fn unknown_user_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.users().credentials_by_user_id("ghost@b.io").unwrap().is_none());
        assert!(db.users().nickname_by_id(42).unwrap().is_none());
    }
}
