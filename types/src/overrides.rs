//! Per-key overrides of the directive.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `always_await` and `never_await` named at least one key in common.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "always_await and never_await must be disjoint, but they share: {}",
    .keys.join(", ")
)]
pub struct OverlapError {
    keys: Vec<String>,
}

impl OverlapError {
    /// Shared keys, in `always_await` order, without duplicates.
    ///
    /// A key repeated in `always_await` is reported once, not once per
    /// repetition as a plain filter over `always_await` would.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

/// Key lists that force an outcome irrespective of the directive.
///
/// Membership is all that matters: keys that do not appear in the data
/// mapping are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwaitOverrides {
    #[serde(default)]
    pub always_await: Vec<String>,
    #[serde(default)]
    pub never_await: Vec<String>,
}

impl AwaitOverrides {
    #[must_use]
    pub fn new(always_await: Vec<String>, never_await: Vec<String>) -> Self {
        Self {
            always_await,
            never_await,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.always_await.is_empty() && self.never_await.is_empty()
    }

    /// Reject override lists that share a key.
    pub fn validate(&self) -> Result<(), OverlapError> {
        let mut keys: Vec<String> = Vec::new();
        for key in &self.always_await {
            if self.never_await.contains(key) && !keys.contains(key) {
                keys.push(key.clone());
            }
        }
        if keys.is_empty() {
            Ok(())
        } else {
            Err(OverlapError { keys })
        }
    }

    /// Apply override precedence to a directive's answer for `key`.
    ///
    /// `never_await` wins over `always_await`; validated overrides never
    /// reach that case.
    #[must_use]
    pub fn should_defer(&self, key: &str, directive: bool) -> bool {
        if self.never_await.iter().any(|k| k == key) {
            true
        } else if self.always_await.iter().any(|k| k == key) {
            false
        } else {
            directive
        }
    }
}
