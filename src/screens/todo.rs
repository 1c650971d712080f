//! Todo list held in two local cells: the draft text and the task list.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::{Cell, StateError, Subscription};

/// One task in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
}

/// Todo screen state.
#[derive(Clone)]
pub struct TodoScreen {
    draft: Cell<String>,
    tasks: Cell<Vec<TodoItem>>,
}

impl TodoScreen {
    pub fn new(initial_draft: impl Into<String>) -> Self {
        Self {
            draft: Cell::named("todo.draft", initial_draft.into()),
            tasks: Cell::named("todo.tasks", Vec::new()),
        }
    }

    pub fn draft(&self) -> String {
        self.draft.get()
    }

    pub fn set_draft(&self, text: impl Into<String>) -> Result<bool, StateError> {
        self.draft.set(text.into())
    }

    /// Whether the draft holds anything besides whitespace.
    pub fn can_add(&self) -> bool {
        self.draft.with(|draft| !draft.trim().is_empty())
    }

    /// Add the trimmed draft as a task and clear the draft.
    ///
    /// Returns the new task's id, or `None` when the draft is blank.
    pub fn add_task(&self) -> Result<Option<String>, StateError> {
        let draft = self.draft.get();
        let id = self.add(&draft)?;
        if id.is_some() {
            self.draft.set(String::new())?;
        }
        Ok(id)
    }

    /// Append a task with the trimmed `text`. Blank text adds nothing.
    pub fn add(&self, text: &str) -> Result<Option<String>, StateError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let item = TodoItem {
            id: Uuid::new_v4().to_string(),
            text: trimmed.to_string(),
        };
        let id = item.id.clone();
        self.tasks.update(move |tasks| {
            let mut next = tasks.clone();
            next.push(item);
            next
        })?;
        Ok(Some(id))
    }

    /// Remove the task with `id`. Returns whether a task was removed.
    pub fn remove(&self, id: &str) -> Result<bool, StateError> {
        self.tasks.update(|tasks| {
            tasks
                .iter()
                .filter(|task| task.id != id)
                .cloned()
                .collect()
        })
    }

    pub fn tasks(&self) -> Vec<TodoItem> {
        self.tasks.get()
    }

    /// Observe both the draft and the task list.
    pub fn subscribe<F>(&self, observer: F) -> Vec<Subscription>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let observer = Arc::new(observer);
        let on_draft = Arc::clone(&observer);
        vec![
            self.draft.subscribe(move || on_draft()),
            self.tasks.subscribe(move || observer()),
        ]
    }

    pub fn render(&self) -> Vec<String> {
        let mut lines = vec![format!("Draft: {}", self.draft())];
        let tasks = self.tasks();
        if tasks.is_empty() {
            lines.push("No tasks yet.".to_string());
        } else {
            lines.extend(
                tasks
                    .iter()
                    .enumerate()
                    .map(|(index, task)| format!("{}. {}", index + 1, task.text)),
            );
        }
        lines
    }
}
