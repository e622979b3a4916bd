// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local development.

use std::env;

const DEFAULT_CALLBACK_URL: &str = "http://localhost:3000/callback";

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gateway (backend) base URL. Empty means same-origin.
    pub gateway: String,
    /// Registered redirect URI for the identity provider callback
    pub callback: String,
    /// Identity provider domain, e.g. `tenant.eu.auth0.com`
    pub auth_domain: String,
    /// OAuth client ID (public)
    pub client_id: String,
    /// API audience requested at login
    pub audience: String,
}

impl Config {
    /// Fixed configuration for tests.
    pub fn test_default() -> Self {
        Self {
            gateway: "http://127.0.0.1:8080".to_string(),
            callback: DEFAULT_CALLBACK_URL.to_string(),
            auth_domain: "test-tenant.auth0.com".to_string(),
            client_id: "test_client_id".to_string(),
            audience: "https://test-tenant.auth0.com/userinfo".to_string(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let auth_domain =
            env::var("AUTH0_DOMAIN").map_err(|_| ConfigError::Missing("AUTH0_DOMAIN"))?;
        let auth_domain = auth_domain.trim().trim_end_matches('/').to_string();

        let config = Self {
            gateway: env::var("GATEWAY_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_default(),
            callback: env::var("AUTH0_CALLBACK_URL")
                .unwrap_or_else(|_| DEFAULT_CALLBACK_URL.to_string()),
            client_id: env::var("AUTH0_CLIENT_ID")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("AUTH0_CLIENT_ID"))?,
            audience: env::var("AUTH0_AUDIENCE")
                .unwrap_or_else(|_| format!("https://{}/userinfo", auth_domain)),
            auth_domain,
        };

        // Fail at startup rather than on the first same-origin request
        config.callback_origin()?;

        Ok(config)
    }

    /// Base URL for gateway calls.
    ///
    /// An empty `gateway` resolves to the origin of the callback URL.
    pub fn gateway_base(&self) -> Result<String, ConfigError> {
        if self.gateway.is_empty() {
            self.callback_origin()
        } else {
            Ok(self.gateway.clone())
        }
    }

    /// True when the gateway is served from the client's own origin.
    pub fn is_same_origin(&self) -> bool {
        self.gateway.is_empty()
    }

    /// `scheme://host[:port]` of the callback URL.
    pub fn callback_origin(&self) -> Result<String, ConfigError> {
        let (scheme, rest) = self
            .callback
            .split_once("://")
            .ok_or_else(|| ConfigError::Invalid("AUTH0_CALLBACK_URL", self.callback.clone()))?;
        let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if scheme.is_empty() || authority.is_empty() {
            return Err(ConfigError::Invalid(
                "AUTH0_CALLBACK_URL",
                self.callback.clone(),
            ));
        }
        Ok(format!("{}://{}", scheme, authority))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
