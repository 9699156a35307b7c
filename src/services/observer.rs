//! Change observers
//!
//! Observers are zero-argument callbacks invoked synchronously, in
//! registration order, after every committed ledger change.

use std::collections::BTreeMap;
use std::fmt;

/// A registered change callback
pub type Observer = Box<dyn FnMut()>;

/// Handle returned by [`ObserverRegistry::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Ordered set of observers keyed by a monotonic counter
///
/// Ids are never reused, so a stale [`SubscriptionId`] can never remove
/// somebody else's observer.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: BTreeMap<SubscriptionId, Observer>,
    next_id: u64,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer; it runs after all previously registered ones
    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.insert(id, Box::new(observer));
        id
    }

    /// Remove an observer, returning whether it was still registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(&id).is_some()
    }

    /// Invoke every observer in registration order
    pub fn notify(&mut self) {
        for observer in self.observers.values_mut() {
            observer();
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("active", &self.observers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
