//! Reactive state containers and the screen catalogue built on them.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod query;
pub mod screens;
pub mod state;
