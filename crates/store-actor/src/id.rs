//! # Identifier Generation
//!
//! Every entity type gets its own [`IdGenerator`]. The generator is an explicit,
//! thread-safe object instead of a bare counter buried in the actor loop, so the
//! owner of a store can rewind it on reset and tests can observe it.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// First identifier issued by a fresh or reset generator.
pub const FIRST_ID: u32 = 1;

/// Monotonic `u32` identifier source scoped to one store instance.
///
/// Clones share the same counter.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: Arc<AtomicU32>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            next: Arc::new(AtomicU32::new(FIRST_ID)),
        }
    }

    /// Issues the next identifier and advances the counter.
    pub fn next_id(&self) -> u32 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// The identifier the next call to [`IdGenerator::next_id`] will return.
    pub fn peek(&self) -> u32 {
        self.next.load(Ordering::SeqCst)
    }

    /// Rewinds the counter to [`FIRST_ID`].
    pub fn reset(&self) {
        self.next.store(FIRST_ID, Ordering::SeqCst);
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
