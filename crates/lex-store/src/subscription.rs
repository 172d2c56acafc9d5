//! Listener registrations
//!
//! A [`Subscription`] is the only way to remove a listener. It only holds a
//! weak reference to its store, so it never keeps the store alive and
//! releasing it after the store is gone is a no-op.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Weak;

/// Identifier of a registered listener, unique per store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub(crate) u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Type-erased view of a store's listener list
pub(crate) trait ListenerRegistry: Send + Sync {
    /// Remove a listener; returns whether it was still registered
    fn remove_listener(&self, id: ListenerId) -> bool;
}

/// Handle returned by [`Store::subscribe`](crate::Store::subscribe)
///
/// Dropping the handle unsubscribes. Call [`Subscription::detach`] to keep
/// the listener for the whole lifetime of the store.
#[must_use = "dropping a Subscription removes the listener immediately"]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<dyn ListenerRegistry>,
    active: AtomicBool,
}

impl Subscription {
    pub(crate) fn new(id: ListenerId, registry: Weak<dyn ListenerRegistry>) -> Self {
        Self {
            id,
            registry,
            active: AtomicBool::new(true),
        }
    }

    /// Listener identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the listener is still registered through this handle
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Remove the listener. Calling this more than once is a no-op.
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            registry.remove_listener(self.id);
        }
    }

    /// Keep the listener registered until the store itself is dropped
    pub fn detach(self) {
        self.active.store(false, Ordering::Release);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
