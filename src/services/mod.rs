// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - identity provider and gateway clients.

pub mod auth;
pub mod backend;

pub use auth::{parse_callback_fragment, AuthClient, CallbackTokens};
pub use backend::BackendClient;
