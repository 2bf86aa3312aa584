use deferif_types::OverlapError;
use thiserror::Error;

/// Why `defer_if` produced no response.
#[derive(Debug, Error)]
pub enum DeferError<E> {
    /// The override lists share keys. Raised before any entry is touched.
    #[error(transparent)]
    Overlap(#[from] OverlapError),
    /// An entry that had to be awaited failed.
    #[error("awaiting `{key}` failed")]
    Upstream {
        key: String,
        #[source]
        source: E,
    },
}

impl<E> DeferError<E> {
    #[must_use]
    pub fn is_overlap(&self) -> bool {
        matches!(self, DeferError::Overlap(_))
    }

    /// The failing entry's key, for upstream failures.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            DeferError::Overlap(_) => None,
            DeferError::Upstream { key, .. } => Some(key),
        }
    }

    #[must_use]
    pub fn into_upstream(self) -> Option<E> {
        match self {
            DeferError::Overlap(_) => None,
            DeferError::Upstream { source, .. } => Some(source),
        }
    }
}
