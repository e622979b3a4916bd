// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! To-do view (protected).
//!
//! Every successful mutation is followed by a full refetch; the view never
//! patches its lists locally. Failed calls leave the lists and inputs as they
//! were.

use crate::error::Result;
use crate::models::{NewTodo, Todo, TodoPartition};
use crate::services::BackendClient;
use validator::Validate;

pub struct TodoView {
    backend: BackendClient,
    todos: TodoPartition,
    /// Title input field
    pub title: String,
    /// Description input field
    pub description: String,
}

impl TodoView {
    pub fn new(backend: BackendClient) -> Self {
        Self {
            backend,
            todos: TodoPartition::default(),
            title: String::new(),
            description: String::new(),
        }
    }

    pub fn active(&self) -> &[Todo] {
        &self.todos.active
    }

    pub fn completed(&self) -> &[Todo] {
        &self.todos.completed
    }

    /// Fetch the full list and split it into active and completed.
    pub async fn load(&mut self) -> Result<()> {
        let todos = self.backend.get_todo_list().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to load to-do list");
            e
        })?;

        self.todos = TodoPartition::partition(todos);
        tracing::debug!(
            active = self.todos.active.len(),
            completed = self.todos.completed.len(),
            "To-do list loaded"
        );
        Ok(())
    }

    /// Create a to-do from the input fields, then clear them and refetch.
    pub async fn add_todo(&mut self) -> Result<()> {
        let new_todo = NewTodo::new(&self.title, &self.description);
        new_todo.validate()?;

        self.backend.add_todo(&new_todo).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to add to-do");
            e
        })?;

        self.title.clear();
        self.description.clear();
        self.load().await
    }

    pub async fn complete_todo(&mut self, todo: &Todo) -> Result<()> {
        self.backend.complete_todo(todo).await.map_err(|e| {
            tracing::warn!(error = %e, id = %todo.id, "Failed to complete to-do");
            e
        })?;
        self.load().await
    }

    pub async fn delete_todo(&mut self, todo: &Todo) -> Result<()> {
        self.backend.delete_todo(todo).await.map_err(|e| {
            tracing::warn!(error = %e, id = %todo.id, "Failed to delete to-do");
            e
        })?;
        self.load().await
    }
}
