//! Composition root: builds every store once and hands it to its screen.

use tokio::runtime::Handle;

use crate::api::{FetchError, UserClient};
use crate::config::Config;
use crate::query::ResourceCache;
use crate::screens::redux_counter::CounterState;
use crate::screens::user::UserCache;
use crate::screens::{
    CounterScreen, CounterStore, ReduxCounterScreen, ThemeScreen, TodoScreen, UserScreen,
    ZustandCounterScreen,
};
use crate::state::SharedStore;

/// User shown by the query screen unless told otherwise.
pub const DEFAULT_USER_ID: u32 = 1;

/// All screens of the catalogue, wired to their containers.
pub struct Catalogue {
    pub todo: TodoScreen,
    pub counter: CounterScreen,
    pub redux: ReduxCounterScreen,
    pub zustand: ZustandCounterScreen,
    pub theme: ThemeScreen,
    pub user: UserScreen,
}

impl Catalogue {
    pub fn new(config: &Config, runtime: Handle) -> Result<Self, FetchError> {
        Self::with_user(config, runtime, DEFAULT_USER_ID)
    }

    pub fn with_user(config: &Config, runtime: Handle, user_id: u32) -> Result<Self, FetchError> {
        let client = UserClient::new(&config.api)?;
        let cache: UserCache = ResourceCache::new(runtime);
        let redux_store = SharedStore::named("redux-counter", CounterState::default());

        tracing::debug!(user_id, base_url = %config.api.base_url, "Building screen catalogue");

        Ok(Self {
            todo: TodoScreen::new(config.todo.initial_draft.clone()),
            counter: CounterScreen::new(),
            redux: ReduxCounterScreen::new(redux_store),
            zustand: ZustandCounterScreen::new(CounterStore::new()),
            theme: ThemeScreen::new(),
            user: UserScreen::new(cache, client, user_id),
        })
    }
}
