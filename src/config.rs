//! Store options.

/// Write behavior for a [`crate::SequenceStore`]. Fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Pretty-print the JSON payload.
    pub pretty: bool,
    /// `fsync` the file before a write reports success.
    pub sync: bool,
    /// Write into a temporary sibling file and rename it over the target.
    pub atomic: bool,
}

impl StoreOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    #[must_use]
    pub fn with_atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }
}
