//! User card backed by the async resource cache.

use std::sync::Arc;

use crate::api::{FetchError, User, UserClient};
use crate::query::{ResourceCache, ResourceEntry, ResourceKey};
use crate::state::{StateError, Subscription};

/// Cache type shared by everything that queries users.
pub type UserCache = ResourceCache<ResourceKey, User, FetchError>;

/// What the user card shows for the current entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserView {
    /// First fetch still in flight.
    Loading,
    /// Last fetch failed.
    Failed(String),
    /// Nothing requested yet.
    Empty,
    /// Data available; `refreshing` while a refetch is in flight.
    Loaded { user: User, refreshing: bool },
}

impl UserView {
    pub fn from_entry(entry: Option<&ResourceEntry<User, FetchError>>) -> Self {
        let Some(entry) = entry else {
            return UserView::Empty;
        };
        if let Some(error) = &entry.error {
            return UserView::Failed(error.to_string());
        }
        match &entry.data {
            Some(user) => UserView::Loaded {
                user: user.clone(),
                refreshing: entry.is_pending(),
            },
            None if entry.is_pending() => UserView::Loading,
            None => UserView::Empty,
        }
    }
}

/// Screen querying one user through the shared cache.
pub struct UserScreen {
    cache: UserCache,
    client: Arc<UserClient>,
    user_id: u32,
}

impl UserScreen {
    pub fn new(cache: UserCache, client: UserClient, user_id: u32) -> Self {
        Self {
            cache,
            client: Arc::new(client),
            user_id,
        }
    }

    pub fn key(&self) -> ResourceKey {
        user_key(self.user_id)
    }

    /// Request the user; a request already in flight is reused.
    pub fn load(&self) -> Result<ResourceEntry<User, FetchError>, StateError> {
        let client = Arc::clone(&self.client);
        let id = self.user_id;
        self.cache.request(self.key(), move || {
            let client = Arc::clone(&client);
            async move { client.fetch_user(id).await }
        })
    }

    /// Fetch again even if the last fetch settled.
    pub fn refetch(&self) -> Result<ResourceEntry<User, FetchError>, StateError> {
        self.cache.refetch(&self.key())
    }

    pub fn view(&self) -> UserView {
        UserView::from_entry(self.cache.entry(&self.key()).as_ref())
    }

    /// Wait for the in-flight fetch to settle and return the resulting view.
    pub async fn settled_view(&self) -> UserView {
        let entry = self.cache.settled(&self.key()).await;
        UserView::from_entry(entry.as_ref())
    }

    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.cache.subscribe(&self.key(), observer)
    }

    pub fn render(&self) -> Vec<String> {
        match self.view() {
            UserView::Loading => vec!["Loading user...".to_string()],
            UserView::Failed(message) => vec![format!("Error: {}", message)],
            UserView::Empty => vec!["No data.".to_string()],
            UserView::Loaded { user, refreshing } => {
                let mut lines = vec![
                    user.name,
                    format!("@{}", user.username),
                    user.email,
                ];
                if refreshing {
                    lines.push("Refreshing...".to_string());
                }
                lines
            }
        }
    }
}

/// Cache key for one user.
pub fn user_key(id: u32) -> ResourceKey {
    ResourceKey::new("user").param(id)
}
