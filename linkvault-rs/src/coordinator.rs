//! Serializes index mutations.
//!
//! Only one caller runs mutations at a time. Requests that arrive meanwhile
//! are queued and picked up by that caller before it lets go, so submitters
//! never block on each other.

use crate::types::FileChange;
use parking_lot::Mutex;
use tracing::trace;

/// A pending change to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Rebuild everything against the settings current when it runs.
    Rebuild,
    /// Apply a single file-system change.
    Apply(FileChange),
}

#[derive(Debug, Default)]
struct Pending {
    queue: Vec<Mutation>,
    in_flight: bool,
}

#[derive(Debug, Default)]
pub struct ChangeCoordinator {
    pending: Mutex<Pending>,
}

impl ChangeCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `mutations` and, unless another caller is already draining,
    /// drain the queue by handing each batch to `run`.
    ///
    /// Returns once this caller's work is queued; it may have been run by a
    /// caller already in flight.
    pub fn submit<I, F>(&self, mutations: I, mut run: F)
    where
        I: IntoIterator<Item = Mutation>,
        F: FnMut(Vec<Mutation>),
    {
        {
            let mut pending = self.pending.lock();
            for mutation in mutations {
                enqueue(&mut pending.queue, mutation);
            }
            if pending.in_flight {
                trace!(queued = pending.queue.len(), "mutation in flight, queued");
                return;
            }
            pending.in_flight = true;
        }

        let mut guard = InFlight {
            pending: &self.pending,
            armed: true,
        };

        loop {
            let batch = {
                let mut pending = self.pending.lock();
                if pending.queue.is_empty() {
                    pending.in_flight = false;
                    guard.armed = false;
                    return;
                }
                std::mem::take(&mut pending.queue)
            };
            run(batch);
        }
    }

    /// Number of mutations waiting to run.
    pub fn queued(&self) -> usize {
        self.pending.lock().queue.len()
    }
}

// A rebuild supersedes everything queued before it. A change replaces an
// earlier queued change for the same path and moves to the back.
fn enqueue(queue: &mut Vec<Mutation>, mutation: Mutation) {
    match &mutation {
        Mutation::Rebuild => queue.clear(),
        Mutation::Apply(change) => {
            queue.retain(|queued| !matches!(queued, Mutation::Apply(c) if c.path == change.path))
        }
    }
    queue.push(mutation);
}

// Clears the in-flight flag if `run` panics, so later submitters can
// still drain.
struct InFlight<'a> {
    pending: &'a Mutex<Pending>,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut pending = self.pending.lock();
            pending.in_flight = false;
            pending.queue.clear();
        }
    }
}
