// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! todo-client: a to-do client behind an identity-provider login.
//!
//! The crate holds the session, drives the provider's redirect login, guards
//! protected views and talks to the to-do gateway. Navigation is expressed as
//! returned [`routes::Navigation`] effects; the [`shell`] module is the
//! runtime that executes them.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod shell;
pub mod time_utils;

use config::{Config, ConfigError};
use routes::{CallbackView, HomeView, Router, TodoView, UserView};
use services::{AuthClient, BackendClient};
use session::SessionStore;
use std::sync::Arc;

/// Application state: one session, its clients, the router and the views.
pub struct App {
    pub config: Config,
    pub session: SessionStore,
    pub auth: Arc<AuthClient>,
    pub backend: BackendClient,
    pub router: Router,
    pub home: HomeView,
    pub callback: CallbackView,
    pub user: UserView,
    pub todo: TodoView,
}

impl App {
    /// Wire every component around a single session store.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let session = SessionStore::new();
        let auth = Arc::new(AuthClient::new(&config, session.clone()));
        let backend = BackendClient::new(config.gateway_base()?, session.clone());

        Ok(Self {
            router: Router::new(auth.clone()),
            home: HomeView::new(auth.clone()),
            callback: CallbackView::new(auth.clone()),
            user: UserView::new(backend.clone(), auth.clone()),
            todo: TodoView::new(backend.clone()),
            config,
            session,
            auth,
            backend,
        })
    }
}
