//! Core domain types for deferif.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! The async resolver and orchestrator live in `deferif-core`.

mod directive;
mod init;
mod overrides;

pub use directive::Directive;
pub use init::ResponseInit;
pub use overrides::{AwaitOverrides, OverlapError};
