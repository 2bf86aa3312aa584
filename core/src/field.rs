//! Loader values that are either available now or still pending.

use std::fmt;
use std::future::Future;

use futures_util::future::{BoxFuture, FutureExt};

/// One value of a loader's data mapping.
pub enum Field<T, E> {
    Ready(T),
    /// A handle that settles later, possibly with an error.
    Pending(BoxFuture<'static, Result<T, E>>),
}

impl<T, E> Field<T, E> {
    #[must_use]
    pub fn ready(value: T) -> Self {
        Self::Ready(value)
    }

    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self::Pending(future.boxed())
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Field::Pending(_))
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Field::Ready(_))
    }

    #[must_use]
    pub fn ready_value(&self) -> Option<&T> {
        match self {
            Field::Ready(value) => Some(value),
            Field::Pending(_) => None,
        }
    }

    #[must_use]
    pub fn into_ready(self) -> Option<T> {
        match self {
            Field::Ready(value) => Some(value),
            Field::Pending(_) => None,
        }
    }

    /// Wait for the value, however it is currently held.
    pub async fn settle(self) -> Result<T, E> {
        match self {
            Field::Ready(value) => Ok(value),
            Field::Pending(handle) => handle.await,
        }
    }
}

impl<T, E> From<T> for Field<T, E> {
    fn from(value: T) -> Self {
        Self::Ready(value)
    }
}

impl<T: fmt::Debug, E> fmt::Debug for Field<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Field::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}
