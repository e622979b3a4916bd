// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gateway API client for the user profile and to-do endpoints.
//!
//! Every call is a single request with no retry. The `Authorization` header
//! carries the session's bearer credential whenever one is held.

use crate::error::{ClientError, Result};
use crate::models::{NewTodo, Todo, UserProfile};
use crate::session::SessionStore;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Gateway API client.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl BackendClient {
    /// Create a client for `base_url` reading credentials from `session`.
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the gateway whether it considers the caller logged in.
    ///
    /// 401/403 map to `Ok(false)`; other failures are returned as errors.
    pub async fn check_auth(&self) -> Result<bool> {
        match self.send(Method::GET, "/auth/check-auth").await {
            Ok(_) => Ok(true),
            Err(e) if e.is_unauthorized() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Get the authenticated user's profile.
    pub async fn get_user_profile(&self) -> Result<UserProfile> {
        self.get_json("/auth/user").await
    }

    /// End the gateway-side session.
    pub async fn logout(&self) -> Result<()> {
        self.send(Method::GET, "/auth/logout").await?;
        Ok(())
    }

    /// Get the full to-do list.
    pub async fn get_todo_list(&self) -> Result<Vec<Todo>> {
        self.get_json("/todo").await
    }

    /// Create a to-do. The title must be non-empty.
    pub async fn add_todo(&self, todo: &NewTodo) -> Result<()> {
        todo.validate()?;

        let response = self
            .request(Method::POST, "/todo")
            .json(todo)
            .send()
            .await?;

        Self::check_response(response).await?;
        tracing::debug!(title = %todo.title, "To-do created");
        Ok(())
    }

    /// Mark a to-do as complete.
    pub async fn complete_todo(&self, todo: &Todo) -> Result<()> {
        let path = format!("/todo/{}", urlencoding::encode(&todo.id));
        self.send(Method::PUT, &path).await?;
        tracing::debug!(id = %todo.id, "To-do completed");
        Ok(())
    }

    /// Delete a to-do.
    pub async fn delete_todo(&self, todo: &Todo) -> Result<()> {
        let path = format!("/todo/{}", urlencoding::encode(&todo.id));
        self.send(Method::DELETE, &path).await?;
        tracing::debug!(id = %todo.id, "To-do deleted");
        Ok(())
    }

    /// Build a request with the bearer header attached when a credential is held.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);

        let auth_header = self.session.auth_header();
        if auth_header.is_empty() {
            builder
        } else {
            builder.header(AUTHORIZATION, auth_header)
        }
    }

    /// Send a body-less request and check the status.
    async fn send(&self, method: Method, path: &str) -> Result<reqwest::Response> {
        let response = self.request(method, path).send().await?;
        Self::check_response(response).await
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::GET, path).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("{}: {}", path, e)))
    }

    /// Check response status and return error if not successful.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), "Gateway server error");
        }

        Err(ClientError::from_status(status, body))
    }
}
