// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation middleware (route guards).

pub mod auth;

pub use auth::{AuthGuard, GuardDecision};
