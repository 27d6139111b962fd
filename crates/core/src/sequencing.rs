//! Sequence-tagged results with last-write-wins storage
//!
//! Evaluations and simulations may finish out of order when hosts run them
//! concurrently. Each request takes a number from a [`SequenceCounter`];
//! a [`ResultRepository`] accepts a result only if it is newer than the one
//! it holds, so a slow stale request never overwrites a fresher answer.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Monotonic request counter
#[derive(Debug, Default)]
pub struct SequenceCounter {
    next: AtomicU64,
}

impl SequenceCounter {
    /// Counter starting at 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Next sequence number; strictly greater than every earlier one
    pub fn next_sequence(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Tag `value` with the next sequence number
    pub fn tag<T>(&self, value: T) -> Sequenced<T> {
        Sequenced {
            sequence: self.next_sequence(),
            value,
        }
    }
}

/// A value with the sequence number of the request that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequenced<T> {
    /// Request sequence number
    pub sequence: u64,
    /// Result payload
    pub value: T,
}

/// Callback notified of every accepted result
pub trait ResultObserver<T>: Send + Sync {
    /// Called after `result` became the latest
    fn on_result(&self, result: &Sequenced<T>);
}

impl<T, F> ResultObserver<T> for F
where
    F: Fn(&Sequenced<T>) + Send + Sync,
{
    fn on_result(&self, result: &Sequenced<T>) {
        self(result);
    }
}

/// Storage for the most recent result of one kind
pub trait ResultRepository<T> {
    /// Store `result` unless a result with an equal or higher sequence is
    /// already held; returns whether it was accepted
    fn offer(&self, result: Sequenced<T>) -> bool;

    /// Most recent accepted result
    fn latest(&self) -> Option<Sequenced<T>>;

    /// Forget the stored result
    fn clear(&self);
}

/// In-memory [`ResultRepository`] with observers
pub struct LatestResult<T> {
    slot: RwLock<Option<Sequenced<T>>>,
    observers: RwLock<Vec<Arc<dyn ResultObserver<T>>>>,
}

impl<T> LatestResult<T> {
    /// Empty repository
    pub fn new() -> Self {
        LatestResult {
            slot: RwLock::new(None),
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Register an observer for accepted results
    pub fn subscribe(&self, observer: Arc<dyn ResultObserver<T>>) {
        self.observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(observer);
    }
}

impl<T> Default for LatestResult<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for LatestResult<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sequence = self
            .slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|r| r.sequence);
        f.debug_struct("LatestResult")
            .field("sequence", &sequence)
            .finish_non_exhaustive()
    }
}

impl<T: Clone> ResultRepository<T> for LatestResult<T> {
    fn offer(&self, result: Sequenced<T>) -> bool {
        {
            let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
            if let Some(current) = slot.as_ref() {
                if current.sequence >= result.sequence {
                    tracing::debug!(
                        "Discarding stale result #{} (holding #{})",
                        result.sequence,
                        current.sequence
                    );
                    return false;
                }
            }
            *slot = Some(result.clone());
        }

        let observers = self.observers.read().unwrap_or_else(PoisonError::into_inner);
        for observer in observers.iter() {
            observer.on_result(&result);
        }
        true
    }

    fn latest(&self) -> Option<Sequenced<T>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
