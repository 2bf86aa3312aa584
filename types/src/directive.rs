//! The default defer/await decision for entries without an override.

use std::fmt;

/// Whether entries should be deferred (left pending) by default.
///
/// `true` means defer, `false` means await before responding.
pub enum Directive {
    Constant(bool),
    /// Invoked once per entry. Results are not memoized, so a stateful
    /// closure may answer differently for each key.
    Computed(Box<dyn FnMut() -> bool + Send>),
}

impl Directive {
    #[must_use]
    pub fn computed(f: impl FnMut() -> bool + Send + 'static) -> Self {
        Self::Computed(Box::new(f))
    }

    /// Produce the decision for the next entry.
    pub fn evaluate(&mut self) -> bool {
        match self {
            Directive::Constant(value) => *value,
            Directive::Computed(f) => f(),
        }
    }
}

impl From<bool> for Directive {
    fn from(value: bool) -> Self {
        Self::Constant(value)
    }
}

impl Default for Directive {
    fn default() -> Self {
        Self::Constant(true)
    }
}

impl fmt::Debug for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Directive::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}
