// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile view (protected).

use crate::error::Result;
use crate::models::UserProfile;
use crate::routes::Navigation;
use crate::services::{AuthClient, BackendClient};
use std::sync::Arc;

pub struct UserView {
    backend: BackendClient,
    auth: Arc<AuthClient>,
    user: UserProfile,
}

impl UserView {
    pub fn new(backend: BackendClient, auth: Arc<AuthClient>) -> Self {
        Self {
            backend,
            auth,
            user: UserProfile::default(),
        }
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    /// Fetch the profile. On failure the previous profile is kept.
    pub async fn load(&mut self) -> Result<()> {
        match self.backend.get_user_profile().await {
            Ok(user) => {
                self.user = user;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load user profile");
                Err(e)
            }
        }
    }

    /// End the gateway session, then drop the local one.
    pub async fn on_logout(&mut self) -> Navigation {
        if let Err(e) = self.backend.logout().await {
            tracing::warn!(error = %e, "Gateway logout failed, clearing local session anyway");
        }
        self.user = UserProfile::default();
        self.auth.logout()
    }
}
