// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Authentication: JWT issuing/validation and password hashing

use crate::config::JwtConfig;
use crate::error::{ServerError, ServerResult};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use axum::http::{HeaderMap, header};
use gw_rest_api_contract::TokenPairResponse;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, warn};

/// Which endpoint a token is good for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// `users.id` for password accounts, the email for Naver accounts
    pub user_id: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub kind: TokenKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn into_body(self, message: Option<&str>) -> TokenPairResponse {
        TokenPairResponse {
            message: message.map(str::to_string),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
        }
    }
}

/// Signs and verifies HS256 tokens with the shared secret
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig) -> ServerResult<Self> {
        if config.secret.is_empty() {
            return Err(ServerError::Internal("JWT secret is not configured".to_string()));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
        })
    }

    pub fn issue(&self, user_id: &str, kind: TokenKind) -> ServerResult<String> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            user_id: user_id.to_string(),
            exp: now + ttl.as_secs() as i64,
            iat: now,
            iss: self.issuer.clone(),
            kind,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| ServerError::Internal(format!("failed to sign token: {err}")))
    }

    pub fn issue_pair(&self, user_id: &str) -> ServerResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue(user_id, TokenKind::Access)?,
            refresh_token: self.issue(user_id, TokenKind::Refresh)?,
        })
    }

    /// Check signature, expiry, issuer and kind
    pub fn validate(&self, token: &str, expected: TokenKind) -> ServerResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|err| {
                debug!(error = %err, "token rejected");
                match err.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        ServerError::Auth("JWT expired".to_string())
                    }
                    _ => ServerError::Auth("Invalid JWT".to_string()),
                }
            })?
            .claims;

        if claims.kind != expected {
            return Err(ServerError::Auth("Invalid JWT".to_string()));
        }
        Ok(claims)
    }
}

/// Token from the `Authorization` header, with or without a `Bearer ` prefix
pub fn bearer_token(headers: &HeaderMap) -> ServerResult<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ServerError::Auth("Missing JWT".to_string()))?
        .to_str()
        .map_err(|_| ServerError::Auth("Invalid JWT".to_string()))?
        .trim_start();

    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        return Err(ServerError::Auth("Missing JWT".to_string()));
    }
    Ok(token)
}

/// Argon2id PHC string with a random salt
pub fn hash_password(password: &str) -> ServerResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServerError::Internal(format!("password hashing failed: {err}")))
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            warn!(error = %err, "stored password hash is malformed");
            false
        }
    }
}

/// Hash of a random secret, checked when the account does not exist
static UNKNOWN_USER_HASH: LazyLock<String> = LazyLock::new(|| {
    let secret = SaltString::generate(&mut OsRng);
    hash_password(secret.as_str()).unwrap_or_default()
});

/// Run the same Argon2 verification a known account costs; never succeeds
/// for a real password
pub fn verify_unknown_user(password: &str) -> bool {
    verify_password(password, &UNKNOWN_USER_HASH)
}
