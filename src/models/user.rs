// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile returned by the gateway.

use serde::{Deserialize, Serialize};

/// Read-only profile projection from `GET /auth/user`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Login name (falls back to the provider `name` claim)
    #[serde(default, alias = "name")]
    pub username: String,
    /// Avatar URL
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub nickname: String,
    /// Last profile update as reported by the provider
    #[serde(default)]
    pub updated_at: String,
}
