// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity provider login flow (implicit grant, tokens in the URL fragment).
//!
//! `login()` and `handle_callback()` never navigate themselves: they return a
//! [`Navigation`] for the runtime to execute. Fragment parsing is a pure
//! function so it can be exercised without any runtime at all.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, TimeDelta, Utc};
use ring::rand::{SecureRandom, SystemRandom};
use std::sync::{Mutex, PoisonError};

use crate::config::Config;
use crate::error::AuthCallbackError;
use crate::routes::{Navigation, Route};
use crate::session::SessionStore;
use crate::time_utils::expiry_from_now;

/// Lifetime assumed when the provider omits `expires_in`.
pub const DEFAULT_EXPIRES_IN_SECS: i64 = 7200;

const RESPONSE_TYPE: &str = "token id_token";
const SCOPE: &str = "openid";

/// Tokens extracted from a successful callback fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackTokens {
    pub access_token: String,
    pub id_token: String,
    pub expires_in: i64,
    pub token_type: Option<String>,
    pub state: Option<String>,
}

impl CallbackTokens {
    /// Absolute expiry, or `None` if `expires_in` overflows the calendar.
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        expiry_from_now(now, self.expires_in)
    }
}

/// A redirect to the provider that has not come back yet.
#[derive(Debug, Clone)]
struct PendingLogin {
    state: String,
    url: String,
}

/// Client for the identity provider's redirect-based login.
pub struct AuthClient {
    domain: String,
    client_id: String,
    audience: String,
    callback: String,
    session: SessionStore,
    rng: SystemRandom,
    pending: Mutex<Option<PendingLogin>>,
    last_error: Mutex<Option<AuthCallbackError>>,
}

impl AuthClient {
    /// Create an auth client writing into `session`.
    pub fn new(config: &Config, session: SessionStore) -> Self {
        Self {
            domain: config.auth_domain.clone(),
            client_id: config.client_id.clone(),
            audience: config.audience.clone(),
            callback: config.callback.clone(),
            session,
            rng: SystemRandom::new(),
            pending: Mutex::new(None),
            last_error: Mutex::new(None),
        }
    }

    /// Begin login: an external redirect to the provider's authorize endpoint.
    ///
    /// Returns [`Navigation::Stay`] while an earlier redirect is still in
    /// flight, so repeated calls never issue a second redirect.
    pub fn login(&self) -> Navigation {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if pending.is_some() {
            tracing::debug!("Login redirect already in flight, not issuing another");
            return Navigation::Stay;
        }

        Navigation::External(self.start_pending(&mut pending))
    }

    /// Login explicitly requested by the user.
    ///
    /// Unlike [`login`](Self::login), a redirect already in flight is issued
    /// again (same URL and state), so an abandoned provider page never leaves
    /// the user without a way to log in.
    pub fn begin_login(&self) -> Navigation {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = pending.as_ref() {
            tracing::info!("Re-issuing pending login redirect");
            return Navigation::External(existing.url.clone());
        }

        Navigation::External(self.start_pending(&mut pending))
    }

    fn start_pending(&self, pending: &mut Option<PendingLogin>) -> String {
        let state = self.generate_state();
        let url = self.authorize_url(&state);
        *pending = Some(PendingLogin {
            state,
            url: url.clone(),
        });

        tracing::info!(
            client_id = %self.client_id,
            domain = %self.domain,
            "Starting login, redirecting to identity provider"
        );

        url
    }

    /// Consume the callback fragment and always land on the home view.
    ///
    /// Failures are recorded for [`take_callback_error`](Self::take_callback_error)
    /// instead of being returned.
    pub fn handle_callback(&self, fragment: &str) -> Navigation {
        let pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        let outcome = parse_callback_fragment(fragment).and_then(|tokens| {
            // A pending login issued a state; the callback must echo it
            if let Some(expected) = &pending {
                if tokens.state.as_deref() != Some(expected.state.as_str()) {
                    return Err(AuthCallbackError::StateMismatch);
                }
            }
            let expires_at = tokens.expires_at(Utc::now()).ok_or_else(|| {
                AuthCallbackError::Malformed(format!("expires_in: {}", tokens.expires_in))
            })?;
            Ok((tokens, expires_at))
        });

        match outcome {
            Ok((tokens, expires_at)) => {
                self.session
                    .set(tokens.access_token, tokens.id_token, expires_at);
                self.set_last_error(None);
                tracing::info!(expires_at = %expires_at, "Login successful, session established");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login callback failed");
                self.set_last_error(Some(e));
            }
        }

        Navigation::Route(Route::Home)
    }

    /// Drop the session and return to the home view.
    pub fn logout(&self) -> Navigation {
        self.session.clear();
        *self.pending.lock().unwrap_or_else(PoisonError::into_inner) = None;
        tracing::info!("Logged out, session cleared");
        Navigation::Route(Route::Home)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_valid()
    }

    /// Whether a login redirect has been issued and not yet answered.
    pub fn login_in_flight(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Take the diagnostic recorded by the last failed callback, if any.
    pub fn take_callback_error(&self) -> Option<AuthCallbackError> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Provider logout URL, returning the browser to the callback origin's home.
    pub fn logout_url(&self, return_to: &str) -> String {
        format!(
            "https://{}/v2/logout?client_id={}&returnTo={}",
            self.domain,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(return_to)
        )
    }

    fn authorize_url(&self, state: &str) -> String {
        format!(
            "https://{}/authorize?\
             client_id={}&\
             response_type={}&\
             audience={}&\
             redirect_uri={}&\
             scope={}&\
             state={}",
            self.domain,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(RESPONSE_TYPE),
            urlencoding::encode(&self.audience),
            urlencoding::encode(&self.callback),
            urlencoding::encode(SCOPE),
            state
        )
    }

    fn generate_state(&self) -> String {
        let mut bytes = [0u8; 24];
        if self.rng.fill(&mut bytes).is_err() {
            // Only reachable if the OS RNG is unavailable; fall back to the clock
            tracing::warn!("System RNG unavailable, deriving login state from time");
            let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
            bytes[..8].copy_from_slice(&nanos.to_le_bytes());
        }
        URL_SAFE_NO_PAD.encode(bytes)
    }

    fn set_last_error(&self, error: Option<AuthCallbackError>) {
        *self.last_error.lock().unwrap_or_else(PoisonError::into_inner) = error;
    }
}

/// Parse the provider's redirect fragment.
///
/// Accepts the bare fragment, the fragment with its leading `#`, or the full
/// callback URL.
pub fn parse_callback_fragment(input: &str) -> Result<CallbackTokens, AuthCallbackError> {
    let fragment = match input.split_once('#') {
        Some((_, fragment)) => fragment,
        None => input,
    };

    let mut access_token = None;
    let mut id_token = None;
    let mut expires_in = None;
    let mut token_type = None;
    let mut state = None;
    let mut error = None;
    let mut error_description = None;

    for pair in fragment.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = urlencoding::decode(value)
            .map_err(|e| AuthCallbackError::Malformed(format!("{}: {}", key, e)))?
            .into_owned();

        match key {
            "access_token" => access_token = Some(value),
            "id_token" => id_token = Some(value),
            "expires_in" => expires_in = Some(value),
            "token_type" => token_type = Some(value),
            "state" => state = Some(value),
            "error" => error = Some(value),
            "error_description" => error_description = Some(value),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Err(AuthCallbackError::Provider {
            error,
            description: error_description.unwrap_or_else(|| "Unknown error".to_string()),
        });
    }

    let access_token = access_token
        .filter(|t| !t.is_empty())
        .ok_or(AuthCallbackError::MissingToken("access_token"))?;
    let id_token = id_token
        .filter(|t| !t.is_empty())
        .ok_or(AuthCallbackError::MissingToken("id_token"))?;

    let expires_in = match expires_in {
        Some(raw) => raw
            .parse::<i64>()
            .ok()
            .filter(|secs| *secs >= 0 && TimeDelta::try_seconds(*secs).is_some())
            .ok_or_else(|| AuthCallbackError::Malformed(format!("expires_in: {}", raw)))?,
        None => DEFAULT_EXPIRES_IN_SECS,
    };

    Ok(CallbackTokens {
        access_token,
        id_token,
        expires_in,
        token_type,
        state,
    })
}
