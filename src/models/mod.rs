// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the gateway API.

pub mod todo;
pub mod user;

pub use todo::{NewTodo, Todo, TodoPartition};
pub use user::UserProfile;
