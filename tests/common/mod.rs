//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use statecraft::api::User;
use statecraft::config::ApiConfig;

/// Observer that counts how often it was called.
pub fn counting_observer() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
    let hits = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&hits);
    (hits, move || {
        seen.fetch_add(1, Ordering::SeqCst);
    })
}

pub fn hits(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

/// Ordered record of observer calls.
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Observer that appends `name` to `log` on every call.
pub fn recording_observer(log: &EventLog, name: &str) -> impl Fn() + Send + Sync + 'static {
    let log = Arc::clone(log);
    let name = name.to_string();
    move || log.lock().push(name.clone())
}

pub fn sample_user() -> User {
    User {
        id: 1,
        name: "Leanne Graham".to_string(),
        username: "Bret".to_string(),
        email: "Sincere@april.biz".to_string(),
    }
}

/// API settings pointing at a local mock server.
pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 2,
        connect_timeout_seconds: 1,
    }
}
