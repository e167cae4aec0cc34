//! Replay-prevention cache.

use parking_lot::RwLock;
use std::collections::HashSet;

/// Cache capacity before the full wipe.
pub const MAX_TRACKED_MESSAGES: usize = 1000;

/// Thread-safe de-duplication cache for processed message ids.
///
/// Deliberately coarse: rather than expiring ids on a time window, the
/// whole set is cleared once it grows past [`MAX_TRACKED_MESSAGES`]. Ids
/// are recorded only for envelopes that passed every verification step.
#[derive(Debug, Default)]
pub struct ReplayCache {
    seen: RwLock<HashSet<String>>,
}

impl ReplayCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the message id was already recorded.
    pub fn contains(&self, message_id: &str) -> bool {
        self.seen.read().contains(message_id)
    }

    /// Records a processed message id, wiping the cache first if it has
    /// grown past capacity.
    pub fn record(&self, message_id: String) {
        let mut seen = self.seen.write();
        seen.insert(message_id);
        if seen.len() > MAX_TRACKED_MESSAGES {
            seen.clear();
        }
    }

    /// Number of tracked ids.
    pub fn len(&self) -> usize {
        self.seen.read().len()
    }

    /// True if no ids are tracked.
    pub fn is_empty(&self) -> bool {
        self.seen.read().is_empty()
    }
}
