//! The seam to the host framework's deferred-response constructor.

use std::collections::BTreeMap;

use deferif_types::ResponseInit;

use crate::Field;

/// Builds the host's deferred response from a reassembled data mapping.
///
/// Whatever bookkeeping the host does (which keys are still pending, who is
/// subscribed to them) belongs to the implementor. `defer_if` returns
/// `Response` unmodified.
pub trait DeferredResponse<T, E> {
    type Response;

    fn construct(
        &self,
        data: BTreeMap<String, Field<T, E>>,
        init: Option<ResponseInit>,
    ) -> Self::Response;
}

impl<T, E, R, F> DeferredResponse<T, E> for F
where
    F: Fn(BTreeMap<String, Field<T, E>>, Option<ResponseInit>) -> R,
{
    type Response = R;

    fn construct(
        &self,
        data: BTreeMap<String, Field<T, E>>,
        init: Option<ResponseInit>,
    ) -> Self::Response {
        self(data, init)
    }
}

/// A constructor that keeps the mapping and init as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeferredParts;

impl<T, E> DeferredResponse<T, E> for DeferredParts {
    type Response = Deferred<T, E>;

    fn construct(
        &self,
        data: BTreeMap<String, Field<T, E>>,
        init: Option<ResponseInit>,
    ) -> Self::Response {
        Deferred { data, init }
    }
}

#[derive(Debug)]
pub struct Deferred<T, E> {
    data: BTreeMap<String, Field<T, E>>,
    init: Option<ResponseInit>,
}

impl<T, E> Deferred<T, E> {
    #[must_use]
    pub fn data(&self) -> &BTreeMap<String, Field<T, E>> {
        &self.data
    }

    #[must_use]
    pub fn init(&self) -> Option<&ResponseInit> {
        self.init.as_ref()
    }

    /// Keys whose values were left pending, in key order.
    pub fn pending_keys(&self) -> impl Iterator<Item = &str> {
        self.data
            .iter()
            .filter(|(_, field)| field.is_pending())
            .map(|(key, _)| key.as_str())
    }

    #[must_use]
    pub fn into_parts(self) -> (BTreeMap<String, Field<T, E>>, Option<ResponseInit>) {
        (self.data, self.init)
    }
}
