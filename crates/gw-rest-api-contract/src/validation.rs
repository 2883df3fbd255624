// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Validation helpers for API contract types

use crate::error::ApiContractError;
use crate::types::*;
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_NICKNAME_CHARS: usize = 8;
pub const MAX_NICKNAME_BYTES: usize = 16;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex")
});

/// Presence checks for a registration request
///
/// Runs before the duplicate-id lookup, so only emptiness is checked here.
pub fn validate_register_fields(request: &RegisterRequest) -> Result<(), ApiContractError> {
    if request.user_id.is_empty() {
        return Err(ApiContractError::MissingUserId);
    }
    if request.password.is_empty() {
        return Err(ApiContractError::MissingPassword);
    }
    if request.nickname.is_empty() {
        return Err(ApiContractError::MissingNickname);
    }
    Ok(())
}

/// Format checks for a registration request
pub fn validate_register_format(request: &RegisterRequest) -> Result<(), ApiContractError> {
    validate_email(&request.user_id)?;
    validate_password(&request.password)?;
    validate_nickname(&request.nickname)
}

pub fn validate_email(user_id: &str) -> Result<(), ApiContractError> {
    if EMAIL_RE.is_match(user_id) {
        Ok(())
    } else {
        Err(ApiContractError::InvalidEmail)
    }
}

/// Length is counted in bytes.
pub fn validate_password(password: &str) -> Result<(), ApiContractError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiContractError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Both limits apply: a Hangul syllable is 3 bytes in UTF-8, so five of them
/// already exceed the byte limit while ASCII nicknames hit the char limit.
pub fn validate_nickname(nickname: &str) -> Result<(), ApiContractError> {
    if nickname.chars().count() > MAX_NICKNAME_CHARS || nickname.len() > MAX_NICKNAME_BYTES {
        return Err(ApiContractError::NicknameTooLong {
            max_chars: MAX_NICKNAME_CHARS,
            max_bytes: MAX_NICKNAME_BYTES,
        });
    }
    Ok(())
}

pub fn validate_chzzk_request(request: &ChzzkFollowRequest) -> Result<(), ApiContractError> {
    if request.id.trim().is_empty() {
        return Err(ApiContractError::MissingChannelId);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user_id: &str, password: &str, nickname: &str) -> RegisterRequest {
        RegisterRequest {
            user_id: user_id.into(),
            password: password.into(),
            nickname: nickname.into(),
        }
    }

    #[test]
    fn missing_fields_reported_in_order() {
        assert_eq!(
            validate_register_fields(&request("", "", "")),
            Err(ApiContractError::MissingUserId)
        );
        assert_eq!(
            validate_register_fields(&request("a@b.io", "", "")),
            Err(ApiContractError::MissingPassword)
        );
        assert_eq!(
            validate_register_fields(&request("a@b.io", "password1", "")),
            Err(ApiContractError::MissingNickname)
        );
        assert!(validate_register_fields(&request("a@b.io", "password1", "guny")).is_ok());
    }

    #[test]
    fn email_format() {
        assert!(validate_email("player.one+tag@example.co.kr").is_ok());
        assert_eq!(validate_email("player"), Err(ApiContractError::InvalidEmail));
        assert_eq!(validate_email("player@host"), Err(ApiContractError::InvalidEmail));
        assert_eq!(validate_email("player@host.c"), Err(ApiContractError::InvalidEmail));
    }

    #[test]
    fn password_minimum_length() {
        assert!(validate_password("12345678").is_ok());
        assert_eq!(
            validate_password("1234567"),
            Err(ApiContractError::PasswordTooShort { min: 8 })
        );
    }

    #[test]
    fn nickname_limits() {
        assert!(validate_nickname("abcdefgh").is_ok());
        assert!(validate_nickname("abcdefghi").is_err());
        // 5 Hangul syllables: 5 chars but 15 bytes
        assert!(validate_nickname("구니월드짱").is_ok());
        // 6 Hangul syllables: 18 bytes
        assert!(validate_nickname("구니월드최고").is_err());
    }

    #[test]
    fn format_checks_run_email_first() {
        assert_eq!(
            validate_register_format(&request("nope", "short", "way-too-long-nick")),
            Err(ApiContractError::InvalidEmail)
        );
        assert!(validate_register_format(&request("a@b.io", "password1", "guny")).is_ok());
    }

    #[test]
    fn chzzk_request_requires_channel() {
        let mut request = ChzzkFollowRequest::default();
        assert_eq!(
            validate_chzzk_request(&request),
            Err(ApiContractError::MissingChannelId)
        );
        request.id = "abc123".into();
        assert!(validate_chzzk_request(&request).is_ok());
    }
}
