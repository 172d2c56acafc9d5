//! Render binding adapter
//!
//! The only layer that knows a UI exists. A mounted [`Binding`] owns exactly
//! one subscription and turns every store notification into a re-render
//! request, whether or not the slice a view selects actually changed.
//! Dropping the binding is the unmount.

use crate::patch::Merge;
use crate::store::Store;
use crate::subscription::Subscription;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Store subscription owned by one mounted view
pub struct Binding<T> {
    store: Store<T>,
    subscription: Subscription,
    renders: Arc<AtomicU64>,
}

impl<T> Binding<T>
where
    T: Merge + Clone + Send + Sync + 'static,
{
    /// Mount a view on `store`
    ///
    /// `schedule_render` is called on every notification.
    pub fn mount<F>(store: &Store<T>, schedule_render: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let renders = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&renders);
        let subscription = store.subscribe(move || {
            counter.fetch_add(1, Ordering::AcqRel);
            schedule_render();
        });
        tracing::debug!(store = store.name(), listener = %subscription.id(), "binding mounted");

        Self {
            store: store.clone(),
            subscription,
            renders,
        }
    }

    /// Mount a view that only tracks the force-update counter
    #[must_use]
    pub fn mount_counting(store: &Store<T>) -> Self {
        Self::mount(store, || {})
    }

    /// Snapshot for the current render
    #[inline]
    #[must_use]
    pub fn state(&self) -> Arc<T> {
        self.store.get_state()
    }

    /// Project the current snapshot
    #[inline]
    pub fn select<S, F>(&self, selector: F) -> S
    where
        F: FnOnce(&T) -> S,
    {
        selector(&self.store.get_state())
    }

    /// Re-render requests received since mount
    #[inline]
    #[must_use]
    pub fn render_requests(&self) -> u64 {
        self.renders.load(Ordering::Acquire)
    }

    /// Whether the subscription is still live
    #[inline]
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.subscription.is_active()
    }

    /// Bound store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Store<T> {
        &self.store
    }

    /// Tear the subscription down
    pub fn unmount(self) {
        tracing::debug!(store = self.store.name(), listener = %self.subscription.id(), "binding unmounted");
    }
}

impl<T> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("subscription", &self.subscription)
            .field("renders", &self.renders.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

/// Non-reactive read of the whole state
#[inline]
#[must_use]
pub fn use_store<T>(store: &Store<T>) -> Arc<T>
where
    T: Merge + Clone + Send + Sync + 'static,
{
    store.get_state()
}

/// Non-reactive read through a selector
#[inline]
pub fn use_store_with<T, S, F>(store: &Store<T>, selector: F) -> S
where
    T: Merge + Clone + Send + Sync + 'static,
    F: FnOnce(&T) -> S,
{
    selector(&store.get_state())
}
