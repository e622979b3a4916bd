// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Home view: entry point with login and navigation actions.

use crate::error::AuthCallbackError;
use crate::routes::{Navigation, Route};
use crate::services::AuthClient;
use std::sync::Arc;

pub struct HomeView {
    auth: Arc<AuthClient>,
}

impl HomeView {
    pub fn new(auth: Arc<AuthClient>) -> Self {
        Self { auth }
    }

    /// Explicit login; re-issues a redirect the user may have abandoned.
    pub fn on_login(&self) -> Navigation {
        self.auth.begin_login()
    }

    pub fn on_user_details(&self) -> Navigation {
        Navigation::Route(Route::User)
    }

    pub fn on_todos(&self) -> Navigation {
        Navigation::Route(Route::Todo)
    }

    pub fn is_logged_in(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// Error from the last failed login callback, reported once.
    pub fn take_login_error(&self) -> Option<AuthCallbackError> {
        self.auth.take_callback_error()
    }
}
