// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! guny-world REST API contract types and validation
//!
//! Request and response bodies shared by the server and its tests. Field
//! names on the wire follow what the web frontend already sends, which mixes
//! snake_case (`user_id`) and camelCase (`accessToken`).

pub mod error;
pub mod types;
pub mod validation;

pub use error::*;
pub use types::*;
