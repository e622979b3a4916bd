// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route guard for protected views.

use crate::routes::Navigation;
use crate::services::AuthClient;
use std::sync::Arc;

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session is valid; navigation may proceed.
    Allow,
    /// Navigation is blocked; the runtime should execute the contained effect.
    Deny(Navigation),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Guard consulted before entering a protected view.
///
/// Uses the local session expiry only; the gateway is never asked.
#[derive(Clone)]
pub struct AuthGuard {
    auth: Arc<AuthClient>,
}

impl AuthGuard {
    pub fn new(auth: Arc<AuthClient>) -> Self {
        Self { auth }
    }

    /// Allow when the session is valid, otherwise start login and deny.
    ///
    /// A login already in flight yields `Deny(Navigation::Stay)`, so repeated
    /// checks produce a single redirect.
    pub fn can_enter(&self) -> GuardDecision {
        if self.auth.is_authenticated() {
            return GuardDecision::Allow;
        }

        tracing::debug!("Protected view requested without a valid session");
        GuardDecision::Deny(self.auth.login())
    }
}
