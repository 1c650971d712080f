//! Tests for shared stores and selector subscriptions.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::*;
use statecraft::screens::counter::CounterAction;
use statecraft::screens::redux_counter::{CounterState, SharedCounterReducer};
use statecraft::screens::{CounterStore, ReduxCounterScreen, ZustandCounterScreen};
use statecraft::state::mvi::{Action, Reducer, State};
use statecraft::state::SharedStore;

#[derive(Debug, Clone, Default, PartialEq)]
struct Session {
    user: String,
    unread: u32,
}

impl State for Session {}

enum SessionAction {
    Login(String),
    Receive,
}

impl Action for SessionAction {}

struct SessionReducer;

impl Reducer for SessionReducer {
    type State = Session;
    type Action = SessionAction;

    fn reduce(mut state: Session, action: SessionAction) -> Session {
        match action {
            SessionAction::Login(user) => state.user = user,
            SessionAction::Receive => state.unread += 1,
        }
        state
    }
}

// -- Selector subscriptions --------------------------------------------------

#[test]
fn selector_observer_runs_only_when_slice_changes() {
    let store = SharedStore::<SessionReducer>::new(Session::default());
    let (user_hits, user_observer) = counting_observer();
    let (unread_hits, unread_observer) = counting_observer();

    let user = store.subscribe_with_selector(|s: &Session| s.user.clone(), user_observer);
    let unread = store.subscribe_with_selector(|s: &Session| s.unread, unread_observer);

    store.dispatch(SessionAction::Receive).unwrap();
    store.dispatch(SessionAction::Receive).unwrap();

    assert_eq!(hits(&user_hits), 0);
    assert_eq!(hits(&unread_hits), 2);
    assert_eq!(unread.current(), 2);

    store
        .dispatch(SessionAction::Login("ada".to_string()))
        .unwrap();
    store
        .dispatch(SessionAction::Login("ada".to_string()))
        .unwrap();

    assert_eq!(hits(&user_hits), 1);
    assert_eq!(hits(&unread_hits), 2);
    assert_eq!(user.current(), "ada");
}

#[test]
fn selector_is_evaluated_once_per_subscriber_per_commit() {
    let store = SharedStore::<SessionReducer>::new(Session::default());
    let evaluations = Arc::new(AtomicUsize::new(0));

    let subscriptions: Vec<_> = (0..3)
        .map(|_| {
            let evaluations = Arc::clone(&evaluations);
            store.subscribe_with_selector(
                move |s: &Session| {
                    evaluations.fetch_add(1, Ordering::SeqCst);
                    s.unread
                },
                || {},
            )
        })
        .collect();
    // One evaluation each to seed the cached slice.
    assert_eq!(evaluations.load(Ordering::SeqCst), 3);

    store.dispatch(SessionAction::Receive).unwrap();
    assert_eq!(evaluations.load(Ordering::SeqCst), 6);

    drop(subscriptions);
    store.dispatch(SessionAction::Receive).unwrap();
    assert_eq!(evaluations.load(Ordering::SeqCst), 6);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn whole_state_subscribers_see_every_commit() {
    let store = SharedStore::<SessionReducer>::named("session", Session::default());
    let (count, observer) = counting_observer();
    let _sub = store.subscribe(observer);

    store.dispatch(SessionAction::Receive).unwrap();
    store
        .dispatch(SessionAction::Login("grace".to_string()))
        .unwrap();

    assert_eq!(hits(&count), 2);
    assert_eq!(store.select(|s| s.unread), 1);
}

// -- Counter screens ---------------------------------------------------------

#[test]
fn screens_sharing_a_store_stay_in_sync() {
    let store = SharedStore::<SharedCounterReducer>::new(CounterState::default());
    let left = ReduxCounterScreen::new(store.clone());
    let right = ReduxCounterScreen::new(store.clone());

    left.increment().unwrap();
    right.increment().unwrap();
    right.dispatch(CounterAction::Unknown).unwrap();

    assert_eq!(left.count(), 2);
    assert_eq!(right.count(), 2);
    assert_eq!(left.render_count(), 2);
    assert_eq!(store.get(), CounterState { count: 2 });
    assert_eq!(left.render(), vec!["Redux-style counter", "Count: 2"]);
}

#[test]
fn bound_actions_reach_every_consumer() {
    let store = CounterStore::new();
    let screen = ZustandCounterScreen::new(store.clone());
    let (count, observer) = counting_observer();
    let slice = store.use_count(observer);

    store.increment().unwrap();
    store.increment().unwrap();
    store.decrement().unwrap();

    assert_eq!(screen.count(), 1);
    assert_eq!(slice.current(), 1);
    assert_eq!(hits(&count), 3);
}

#[test]
fn unrecognised_action_tag_leaves_state_unchanged() {
    let store = SharedStore::<SharedCounterReducer>::new(CounterState { count: 4 });
    let (count, observer) = counting_observer();
    let _sub = store.subscribe(observer);

    let script = r#"[{"type":"reset"},{"type":"increment"},{"type":"reset"}]"#;
    for action in CounterAction::parse_script(script).unwrap() {
        store.dispatch(action).unwrap();
    }

    assert_eq!(store.get().count, 5);
    assert_eq!(hits(&count), 1);
}
