// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! To-do items and the active/completed split shown by the to-do view.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A to-do item as stored by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    /// Owner (the gateway's wire name is `user`)
    #[serde(default, rename = "user", alias = "username")]
    pub username: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub complete: bool,
}

/// Payload for `POST /todo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct NewTodo {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub description: String,
}

impl NewTodo {
    /// Build a payload from raw input fields, trimming surrounding whitespace.
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
        }
    }
}

/// Stable split of a to-do list by completion state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPartition {
    pub active: Vec<Todo>,
    pub completed: Vec<Todo>,
}

impl TodoPartition {
    /// Partition `todos`, keeping the original order within each side.
    pub fn partition(todos: Vec<Todo>) -> Self {
        let (completed, active) = todos.into_iter().partition(|t| t.complete);
        Self { active, completed }
    }

    pub fn len(&self) -> usize {
        self.active.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
