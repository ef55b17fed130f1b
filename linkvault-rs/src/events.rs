//! Index change notifications.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

/// Payload-free signal that the index changed. Consumers re-query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexChanged;

/// Broadcasts [`IndexChanged`] to every subscriber.
///
/// Slow receivers may lag and miss signals; since the event carries no data,
/// any received signal (or a `Lagged` error) means "re-query".
#[derive(Debug)]
pub struct Notifier {
    sender: broadcast::Sender<IndexChanged>,
    generation: AtomicU64,
}

impl Notifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            sender,
            generation: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<IndexChanged> {
        self.sender.subscribe()
    }

    pub fn notify(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        // No subscribers is not an error.
        let _ = self.sender.send(IndexChanged);
    }

    /// Number of notifications fired so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
