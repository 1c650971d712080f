//! Command-line surface: one subcommand per screen.
//!
//! [`run`] drives a screen from the parsed arguments and returns the lines it
//! rendered. Printing is left to the binary.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use crate::app::{Catalogue, DEFAULT_USER_ID};
use crate::screens::counter::CounterAction;
use crate::screens::theme::use_theme;

#[derive(Debug, Parser)]
#[command(
    name = "statecraft",
    about = "Screens demonstrating different ways of holding UI state"
)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Todo list kept in local cells
    Todo {
        /// Task to add (repeatable)
        #[arg(long = "add")]
        add: Vec<String>,
        /// 1-based position of a task to remove after adding (repeatable)
        #[arg(long = "remove")]
        remove: Vec<usize>,
    },
    /// Counter driven by a local reducer store
    Counter {
        #[arg(long, default_value_t = 0)]
        increment: u32,
        #[arg(long, default_value_t = 0)]
        decrement: u32,
    },
    /// Counter in a shared store, fed a JSON array of actions
    Redux {
        /// e.g. '[{"type":"increment"},{"type":"decrement"}]'
        #[arg(long, default_value = "[]")]
        actions: String,
    },
    /// Counter store with bound actions
    Zustand {
        #[arg(long, default_value_t = 0)]
        increment: u32,
        #[arg(long, default_value_t = 0)]
        decrement: u32,
    },
    /// Theme published through a scoped provider
    Theme {
        #[arg(long, default_value_t = 1)]
        toggles: u32,
    },
    /// User fetched through the resource cache
    User {
        #[arg(long, default_value_t = DEFAULT_USER_ID)]
        id: u32,
        /// Fetch a second time after the first fetch settles
        #[arg(long)]
        refetch: bool,
    },
}

impl Command {
    /// User the catalogue should be built for.
    pub fn user_id(&self) -> u32 {
        match self {
            Command::User { id, .. } => *id,
            _ => DEFAULT_USER_ID,
        }
    }
}

/// Drive the screen named by `command` and collect what it rendered.
///
/// The user screen renders once per state it passes through, so its output
/// holds the loading card followed by the settled one.
pub async fn run(catalogue: &Catalogue, command: Command) -> anyhow::Result<Vec<String>> {
    match command {
        Command::Todo { add, remove } => run_todo(catalogue, &add, &remove),
        Command::Counter {
            increment,
            decrement,
        } => {
            for _ in 0..increment {
                catalogue.counter.increment()?;
            }
            for _ in 0..decrement {
                catalogue.counter.decrement()?;
            }
            Ok(catalogue.counter.render())
        }
        Command::Redux { actions } => {
            let actions =
                CounterAction::parse_script(&actions).context("Invalid --actions JSON")?;
            for action in actions {
                catalogue.redux.dispatch(action)?;
            }
            let mut lines = catalogue.redux.render();
            lines.push(format!("Re-renders: {}", catalogue.redux.render_count()));
            Ok(lines)
        }
        Command::Zustand {
            increment,
            decrement,
        } => {
            let store = catalogue.zustand.store();
            for _ in 0..increment {
                store.increment()?;
            }
            for _ in 0..decrement {
                store.decrement()?;
            }
            Ok(catalogue.zustand.render())
        }
        Command::Theme { toggles } => {
            catalogue.theme.provide(|| -> anyhow::Result<()> {
                let context = use_theme()?;
                for _ in 0..toggles {
                    context.toggle_theme()?;
                }
                Ok(())
            })?;
            Ok(catalogue.theme.render()?)
        }
        Command::User { refetch, .. } => {
            let _subscription = catalogue.user.subscribe(|| {
                tracing::debug!("User entry changed");
            });

            catalogue.user.load()?;
            let mut lines = catalogue.user.render();
            catalogue.user.settled_view().await;
            lines.extend(catalogue.user.render());

            if refetch {
                catalogue.user.refetch()?;
                lines.extend(catalogue.user.render());
                catalogue.user.settled_view().await;
                lines.extend(catalogue.user.render());
            }
            Ok(lines)
        }
    }
}

/// Add every text, then remove by 1-based position in the resulting list.
fn run_todo(
    catalogue: &Catalogue,
    add: &[String],
    remove: &[usize],
) -> anyhow::Result<Vec<String>> {
    let todo = &catalogue.todo;
    for text in add {
        if todo.add(text)?.is_none() {
            tracing::warn!("Skipping blank task");
        }
    }

    // Positions refer to the list before any removal.
    let tasks = todo.tasks();
    let mut ids = Vec::with_capacity(remove.len());
    for position in remove {
        let Some(task) = position.checked_sub(1).and_then(|index| tasks.get(index)) else {
            bail!("No task at position {} ({} tasks)", position, tasks.len());
        };
        ids.push(task.id.clone());
    }
    for id in ids {
        todo.remove(&id)?;
    }

    Ok(todo.render())
}
