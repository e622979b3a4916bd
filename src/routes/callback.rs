// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Callback view: the identity provider redirects here with tokens in the fragment.

use crate::routes::Navigation;
use crate::services::AuthClient;
use std::sync::Arc;

pub struct CallbackView {
    auth: Arc<AuthClient>,
}

impl CallbackView {
    pub fn new(auth: Arc<AuthClient>) -> Self {
        Self { auth }
    }

    /// Hand the fragment to the auth client. Always leads back home.
    pub fn on_enter(&self, fragment: &str) -> Navigation {
        self.auth.handle_callback(fragment)
    }
}
