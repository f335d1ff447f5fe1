//! Replay-latest multicast of list snapshots.
//!
//! The publisher keeps the most recently published list and a registry of
//! observers. [`ListPublisher::publish`] replaces the stored list and then
//! hands it to every observer in registration order. A new subscriber is
//! called synchronously with the stored list before [`subscribe`] returns,
//! so it never starts from a stale or empty view.
//!
//! Observers run while the publisher lock is held. They must not subscribe,
//! release, or publish from inside the callback; forward the snapshot to a
//! channel instead.
//!
//! [`subscribe`]: ListPublisher::subscribe

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use fizzbuzz_types::SequenceItem;
use tracing::debug;

/// Receives every list snapshot published after subscription.
pub trait ListObserver: Send {
    /// Called with the full current list.
    fn on_list(&mut self, items: &[SequenceItem]);
}

impl<F> ListObserver for F
where
    F: FnMut(&[SequenceItem]) + Send,
{
    fn on_list(&mut self, items: &[SequenceItem]) {
        self(items);
    }
}

struct Registry {
    latest: Vec<SequenceItem>,
    observers: BTreeMap<u64, Box<dyn ListObserver>>,
    next_id: u64,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Multicast store for list snapshots with replay-latest semantics.
#[derive(Clone)]
pub struct ListPublisher {
    registry: Arc<Mutex<Registry>>,
}

impl ListPublisher {
    /// Create a publisher whose stored value is the empty list.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                latest: Vec::new(),
                observers: BTreeMap::new(),
                next_id: 0,
            })),
        }
    }

    /// Register `observer`, deliver the stored list to it immediately, and
    /// return the handle that ends delivery.
    pub fn subscribe<O>(&self, observer: O) -> Subscription
    where
        O: ListObserver + 'static,
    {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id = id.wrapping_add(1);

        let mut observer: Box<dyn ListObserver> = Box::new(observer);
        observer.on_list(&registry.latest);
        registry.observers.insert(id, observer);
        debug!(subscription = id, observers = registry.observers.len(), "Observer subscribed");

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Store `items` as the latest value and deliver it to every observer.
    pub fn publish(&self, items: &[SequenceItem]) {
        let mut registry = lock(&self.registry);
        let Registry {
            latest, observers, ..
        } = &mut *registry;

        latest.clear();
        latest.extend_from_slice(items);
        for observer in observers.values_mut() {
            observer.on_list(latest);
        }
    }

    /// Clone of the most recently published list.
    #[cfg(test)]
    pub fn latest(&self) -> Vec<SequenceItem> {
        lock(&self.registry).latest.clone()
    }

    /// Number of currently registered observers.
    #[cfg(test)]
    pub fn observer_count(&self) -> usize {
        lock(&self.registry).observers.len()
    }
}

impl Default for ListPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ListPublisher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let registry = lock(&self.registry);
        f.debug_struct("ListPublisher")
            .field("latest_len", &registry.latest.len())
            .field("observers", &registry.observers.len())
            .finish()
    }
}

/// Handle for one registered observer.
///
/// Dropping the handle releases the observer. The handle does not keep the
/// publisher alive; releasing after the publisher is gone is a no-op.
#[derive(Debug)]
#[must_use = "dropping a Subscription immediately stops delivery"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Stop delivery to this observer. Idempotent.
    pub fn release(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let removed = lock(&registry).observers.remove(&self.id).is_some();
            if removed {
                debug!(subscription = self.id, "Observer released");
            }
        }
        self.registry = Weak::new();
    }

    /// Whether this handle still has an observer registered.
    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| lock(&registry).observers.contains_key(&self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
