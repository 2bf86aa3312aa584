//! Conditional deferral for loader data.
//!
//! [`defer_if`] takes a mapping of loader values, some of which may still be
//! pending, and decides per key whether to await the value before the
//! response is built or to leave it pending for the client to stream. The
//! reassembled mapping is handed to a [`DeferredResponse`] constructor owned
//! by the host framework.

mod defer;
mod error;
mod field;
mod resolve;
mod response;

pub use defer::{DeferOptions, defer_if};
pub use error::DeferError;
pub use field::Field;
pub use resolve::resolve_conditionally;
pub use response::{Deferred, DeferredParts, DeferredResponse};

pub use deferif_types::{AwaitOverrides, Directive, OverlapError, ResponseInit};
