// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side routes, navigation effects and the views behind them.

pub mod callback;
pub mod home;
pub mod todo;
pub mod user;

use crate::middleware::auth::{AuthGuard, GuardDecision};
use crate::services::AuthClient;
use std::fmt;
use std::sync::Arc;

pub use callback::CallbackView;
pub use home::HomeView;
pub use todo::TodoView;
pub use user::UserView;

/// Views reachable inside the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Callback,
    /// Client-side routed login; entering it starts the provider redirect.
    Login,
    User,
    Todo,
}

impl Route {
    /// Resolve a path. The empty path and `/` redirect to home.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        match path.trim_end_matches('/') {
            "" | "/home" | "home" => Some(Route::Home),
            "/callback" | "callback" => Some(Route::Callback),
            "/auth/login" | "auth/login" => Some(Route::Login),
            "/user" | "user" => Some(Route::User),
            "/todo" | "todo" => Some(Route::Todo),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/home",
            Route::Callback => "/callback",
            Route::Login => "/auth/login",
            Route::User => "/user",
            Route::Todo => "/todo",
        }
    }

    /// Whether the route guard must approve entry.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::User | Route::Todo)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A navigation effect for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Nothing to do.
    Stay,
    /// Enter a client route.
    Route(Route),
    /// Full navigation away from the client (identity provider redirect).
    External(String),
}

/// Result of asking the router to enter a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The route is now current; its view should load.
    Entered(Route),
    /// The guard refused entry; execute the effect instead.
    Blocked(Navigation),
    /// The route only forwards elsewhere.
    Redirect(Navigation),
}

/// Tracks the current route and applies the guard to protected ones.
pub struct Router {
    guard: AuthGuard,
    auth: Arc<AuthClient>,
    current: Route,
}

impl Router {
    pub fn new(auth: Arc<AuthClient>) -> Self {
        Self {
            guard: AuthGuard::new(auth.clone()),
            auth,
            current: Route::Home,
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Try to enter `route`. The current route only changes on `Entered`.
    pub fn navigate(&mut self, route: Route) -> NavigationOutcome {
        if route == Route::Login {
            return NavigationOutcome::Redirect(self.auth.begin_login());
        }

        if route.is_protected() {
            if let GuardDecision::Deny(effect) = self.guard.can_enter() {
                tracing::info!(route = %route, "Navigation blocked by auth guard");
                return NavigationOutcome::Blocked(effect);
            }
        }

        tracing::debug!(from = %self.current, to = %route, "Navigating");
        self.current = route;
        NavigationOutcome::Entered(route)
    }
}
