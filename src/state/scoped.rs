//! Scope-bound values resolved at read time.
//!
//! A [`ScopedProvider`] publishes a value to everything that runs inside its
//! [`provide`](ScopedProvider::provide) call. Descendants call
//! [`use_scoped`], which walks an explicit per-thread scope stack from the
//! innermost frame outwards and reads the nearest matching provider. The
//! provider reads its backing container on every lookup, so descendants
//! never see a copy older than the container itself.
//!
//! Reading with no enclosing provider is a wiring bug and fails with
//! [`StateError::MissingProvider`].

use std::any::{type_name, Any};
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use super::container::Container;
use super::error::StateError;

type Reader<T> = Arc<dyn Fn() -> T + Send + Sync>;

struct Frame {
    type_name: &'static str,
    /// Always a `Reader<T>` for the `T` named by `type_name`.
    reader: Box<dyn Any>,
}

thread_local! {
    static SCOPE_STACK: RefCell<Vec<Frame>> = const { RefCell::new(Vec::new()) };
}

/// Publishes a `T` to the logical descendants of one scope.
pub struct ScopedProvider<T> {
    reader: Reader<T>,
}

impl<T> Clone for ScopedProvider<T> {
    fn clone(&self) -> Self {
        Self {
            reader: Arc::clone(&self.reader),
        }
    }
}

impl<T: 'static> ScopedProvider<T> {
    /// Publish the current value of a backing container.
    pub fn from_container<C>(container: C) -> Self
    where
        C: Container<Value = T> + 'static,
    {
        Self::from_fn(move || container.get())
    }

    /// Publish a value derived at read time, typically from one or more
    /// backing containers.
    pub fn from_fn<F>(read: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            reader: Arc::new(read),
        }
    }

    /// Publish a fixed value.
    pub fn constant(value: T) -> Self
    where
        T: Clone + Send + Sync,
    {
        Self::from_fn(move || value.clone())
    }

    /// Run `render` with this provider as the innermost scope for `T`.
    pub fn provide<R>(&self, render: impl FnOnce() -> R) -> R {
        let depth = SCOPE_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push(Frame {
                type_name: type_name::<T>(),
                reader: Box::new(Arc::clone(&self.reader)),
            });
            stack.len() - 1
        });

        let _frame_guard = scopeguard::guard(depth, |depth| {
            SCOPE_STACK.with(|stack| stack.borrow_mut().truncate(depth));
        });

        render()
    }
}

impl<T> fmt::Debug for ScopedProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedProvider")
            .field("type", &type_name::<T>())
            .finish()
    }
}

/// Run `render` with `value` published to it.
pub fn provide<T, R>(value: T, render: impl FnOnce() -> R) -> R
where
    T: Clone + Send + Sync + 'static,
{
    ScopedProvider::constant(value).provide(render)
}

/// Read the value published by the nearest enclosing provider of `T`.
pub fn use_scoped<T: 'static>() -> Result<T, StateError> {
    let reader = SCOPE_STACK.with(|stack| {
        stack
            .borrow()
            .iter()
            .rev()
            .find_map(|frame| frame.reader.downcast_ref::<Reader<T>>().cloned())
    });

    match reader {
        Some(read) => Ok(read()),
        None => {
            tracing::error!(
                value_type = type_name::<T>(),
                "Scoped value read outside of its provider"
            );
            Err(StateError::MissingProvider {
                type_name: type_name::<T>(),
            })
        }
    }
}

/// Names of the providers enclosing the caller, innermost last.
pub fn active_scopes() -> Vec<&'static str> {
    SCOPE_STACK.with(|stack| stack.borrow().iter().map(|frame| frame.type_name).collect())
}
