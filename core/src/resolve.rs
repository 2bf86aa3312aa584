//! Single-value conditional resolution.

use crate::Field;

/// Hand back `value` untouched when `should_defer` is set, otherwise wait
/// for it.
///
/// A deferred handle is never polled here, so the caller does not wait on
/// the underlying computation and any failure stays inside the handle. An
/// awaited handle's failure is returned to the caller.
pub async fn resolve_conditionally<T, E>(
    value: Field<T, E>,
    should_defer: bool,
) -> Result<Field<T, E>, E> {
    if should_defer {
        return Ok(value);
    }
    match value {
        Field::Ready(value) => Ok(Field::Ready(value)),
        Field::Pending(handle) => handle.await.map(Field::Ready),
    }
}
