//! Mapping-level orchestration: decide per key, resolve concurrently, and
//! hand the result to the response constructor.

use std::collections::BTreeMap;

use deferif_config::DeferPolicy;
use deferif_types::{AwaitOverrides, Directive, ResponseInit};
use futures_util::future::try_join_all;

use crate::{DeferError, DeferredResponse, Field, resolve_conditionally};

/// Options for [`defer_if`].
#[derive(Debug, Clone, Default)]
pub struct DeferOptions {
    pub init: Option<ResponseInit>,
    pub overrides: AwaitOverrides,
}

impl DeferOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_init(mut self, init: impl Into<ResponseInit>) -> Self {
        self.init = Some(init.into());
        self
    }

    /// Keys that are awaited even when the directive says defer.
    pub fn always_await<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overrides
            .always_await
            .extend(keys.into_iter().map(Into::into));
        self
    }

    /// Keys that stay pending even when the directive says await.
    pub fn never_await<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overrides
            .never_await
            .extend(keys.into_iter().map(Into::into));
        self
    }

    /// Options carried by a configured policy. The policy's own directive
    /// comes from [`DeferPolicy::directive`].
    #[must_use]
    pub fn from_policy(policy: &DeferPolicy) -> Self {
        Self {
            init: policy.init().cloned(),
            overrides: policy.overrides().clone(),
        }
    }
}

/// Like the host's `defer`, except pending values are still awaited before
/// responding unless the directive (or a `never_await` override) says to
/// defer them.
///
/// The directive is evaluated once per entry. Overrides take precedence:
/// `never_await` keys stay pending, `always_await` keys are resolved. Keys
/// in either list that are missing from `data` are ignored.
///
/// All awaited entries resolve concurrently; the first failure aborts the
/// call and the remaining entries are dropped unsettled.
pub async fn defer_if<T, E, R>(
    data: BTreeMap<String, Field<T, E>>,
    directive: impl Into<Directive>,
    options: DeferOptions,
    constructor: &R,
) -> Result<R::Response, DeferError<E>>
where
    R: DeferredResponse<T, E>,
{
    let DeferOptions { init, overrides } = options;
    if let Err(err) = overrides.validate() {
        tracing::warn!(keys = ?err.keys(), "Rejected overlapping await overrides");
        return Err(err.into());
    }

    let mut directive = directive.into();
    let entries = data.into_iter().map(|(key, value)| {
        let directed = directive.evaluate();
        let should_defer = overrides.should_defer(&key, directed);
        tracing::debug!(key = %key, directed, should_defer, "Deciding entry");
        async move {
            match resolve_conditionally(value, should_defer).await {
                Ok(field) => {
                    if !should_defer {
                        tracing::debug!(key = %key, "Entry settled");
                    }
                    Ok((key, field))
                }
                Err(source) => {
                    tracing::warn!(key = %key, "Awaited entry failed");
                    Err(DeferError::Upstream { key, source })
                }
            }
        }
    });
    // Collect first so every directive call happens before any entry is polled.
    let entries: Vec<_> = entries.collect();
    let resolved = try_join_all(entries).await?;

    Ok(constructor.construct(resolved.into_iter().collect(), init))
}
