use std::sync::atomic::{AtomicU64, Ordering};

/// Error enumeration shared by every repository trait.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Monotonic id source backing the in-memory stores. A relational deployment
/// would delegate this to the database's identity columns.
#[derive(Debug)]
pub struct Sequence(AtomicU64);

impl Sequence {
    pub const fn new() -> Self {
        Self(AtomicU64::new(1))
    }

    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}
