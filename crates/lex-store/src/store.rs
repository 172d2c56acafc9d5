//! Observable store
//!
//! [`Store`] holds an `Arc<T>` snapshot and an ordered listener list.
//!
//! # Invariants
//!
//! 1. Every transition installs a new `Arc<T>`; previous snapshots are never
//!    touched, so `Arc::ptr_eq` is a valid change check.
//! 2. `set_state`, `update` and `reset` are the only write paths.
//! 3. Listeners run synchronously, in registration order, before the
//!    writing call returns. Rounds run on the thread that owns the
//!    notification loop: a write from another thread while a round is in
//!    progress blocks until the owner has delivered its round. A listener
//!    must therefore not wait on a thread that writes to the same store.
//!    A nested write from inside a listener is the exception, see
//!    [`ReentrancyPolicy`].
//! 4. No lock is held while a listener runs.
//! 5. The listener list is snapshotted per round; (un)subscribing from inside
//!    a listener takes effect from the next round.

use crate::patch::Merge;
use crate::subscription::{ListenerId, ListenerRegistry, Subscription};
use parking_lot::{Condvar, Mutex, ReentrantMutex};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, ThreadId};

type Listener = Arc<dyn Fn() + Send + Sync>;

/// Behaviour when a listener writes to the store that is notifying it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReentrancyPolicy {
    /// Apply the nested change now, notify in an extra round afterwards
    #[default]
    Queue,

    /// Notify inline, re-entering listeners that are still running
    Recurse,
}

/// Store configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Re-entrant update handling
    pub reentrancy: ReentrancyPolicy,
    /// Log transitions at debug instead of trace level
    pub trace_transitions: bool,
}

impl StoreConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With re-entrancy policy
    #[inline]
    #[must_use]
    pub fn with_reentrancy(mut self, policy: ReentrancyPolicy) -> Self {
        self.reentrancy = policy;
        self
    }

    /// With transition tracing
    #[inline]
    #[must_use]
    pub fn with_trace_transitions(mut self, enabled: bool) -> Self {
        self.trace_transitions = enabled;
        self
    }
}

/// Observable state container
///
/// Cloning the handle shares the same underlying store.
pub struct Store<T> {
    inner: Arc<StoreInner<T>>,
}

struct StoreInner<T> {
    name: String,
    config: StoreConfig,
    initial: T,
    state: Mutex<Arc<T>>,
    /// Serializes read-modify-write across threads; holds the nesting depth
    write_gate: ReentrantMutex<Cell<u32>>,
    listeners: Mutex<Vec<(ListenerId, Listener)>>,
    next_listener: AtomicU64,
    version: AtomicU64,
    dispatch: Mutex<Dispatch>,
    round_done: Condvar,
}

/// Notification bookkeeping
///
/// Every queued round takes a ticket; round `n` is delivered once
/// `completed >= n`.
#[derive(Debug, Default)]
struct Dispatch {
    /// Thread currently running the notification loop
    owner: Option<ThreadId>,
    /// Rounds requested so far
    requested: u64,
    /// Rounds delivered so far
    completed: u64,
}

/// Releases loop ownership if a listener unwinds
///
/// The failed round counts as delivered. Rounds queued behind it stay
/// queued: a waiting writer takes the loop over, otherwise the next
/// writer delivers them.
struct DispatchGuard<'a> {
    dispatch: &'a Mutex<Dispatch>,
    round_done: &'a Condvar,
    armed: bool,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut dispatch = self.dispatch.lock();
            dispatch.owner = None;
            dispatch.completed += 1;
            self.round_done.notify_all();
        }
    }
}

/// Tracks nesting of the write gate, unwinding included
struct GateDepth<'a>(&'a Cell<u32>);

impl<'a> GateDepth<'a> {
    fn enter(depth: &'a Cell<u32>) -> Self {
        depth.set(depth.get() + 1);
        Self(depth)
    }
}

impl Drop for GateDepth<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

impl<T> Store<T>
where
    T: Merge + Clone + Send + Sync + 'static,
{
    /// Create store with default configuration
    #[inline]
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_config("store", initial, StoreConfig::default())
    }

    /// Create named store with configuration
    #[must_use]
    pub fn with_config(name: impl Into<String>, initial: T, config: StoreConfig) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                name: name.into(),
                config,
                state: Mutex::new(Arc::new(initial.clone())),
                initial,
                write_gate: ReentrantMutex::new(Cell::new(0)),
                listeners: Mutex::new(Vec::new()),
                next_listener: AtomicU64::new(0),
                version: AtomicU64::new(0),
                dispatch: Mutex::new(Dispatch::default()),
                round_done: Condvar::new(),
            }),
        }
    }

    /// Current snapshot
    #[inline]
    #[must_use]
    pub fn get_state(&self) -> Arc<T> {
        Arc::clone(&self.inner.state.lock())
    }

    /// Merge `patch` into the current state and notify listeners
    pub fn set_state(&self, patch: T::Patch) {
        self.apply(|current| current.merge(patch));
    }

    /// Compute a patch from the current state, merge it and notify
    ///
    /// `f` must not write to this store: such a write is overwritten by
    /// the patch `f` returns. It is logged, and panics with `strict-debug`.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T::Patch,
    {
        self.apply(|current| current.merge(f(current)));
    }

    /// Restore the initial state and notify
    pub fn reset(&self) {
        self.apply(|_| self.inner.initial.clone());
    }

    /// Register a listener
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = ListenerId(self.inner.next_listener.fetch_add(1, Ordering::Relaxed));
        self.inner.listeners.lock().push((id, Arc::new(listener)));
        tracing::debug!(store = %self.inner.name, listener = %id, "listener subscribed");

        let registry: Arc<dyn ListenerRegistry> = self.inner.clone();
        Subscription::new(id, Arc::downgrade(&registry))
    }

    /// Number of registered listeners
    #[inline]
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    /// Number of transitions applied since creation
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::Acquire)
    }

    /// Store name used in logs
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Store configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// State the store was created with
    #[inline]
    #[must_use]
    pub fn initial_state(&self) -> &T {
        &self.inner.initial
    }

    /// Whether two handles point at the same store
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn apply(&self, transition: impl FnOnce(&T) -> T) {
        let version = {
            let gate = self.inner.write_gate.lock();
            if gate.get() > 0 {
                assert!(
                    !cfg!(feature = "strict-debug"),
                    "state update on store '{}' from inside its own updater",
                    self.inner.name
                );
                tracing::warn!(
                    store = %self.inner.name,
                    "write from inside an updater; the outer update overwrites it"
                );
            }
            let _depth = GateDepth::enter(&gate);
            let current = self.get_state();
            let next = Arc::new(transition(&current));
            *self.inner.state.lock() = next;
            self.inner.version.fetch_add(1, Ordering::AcqRel) + 1
        };

        if self.inner.config.trace_transitions {
            tracing::debug!(store = %self.inner.name, version, "state transition");
        } else {
            tracing::trace!(store = %self.inner.name, version, "state transition");
        }

        self.notify();
    }

    fn notify(&self) {
        let current = thread::current().id();
        let mut dispatch = self.inner.dispatch.lock();

        if dispatch.owner == Some(current) {
            assert!(
                !cfg!(feature = "strict-debug"),
                "re-entrant state update on store '{}' while notifying listeners",
                self.inner.name
            );

            if self.inner.config.reentrancy == ReentrancyPolicy::Queue {
                dispatch.requested += 1;
                tracing::trace!(store = %self.inner.name, "nested notification queued");
                return;
            }
            drop(dispatch);
            self.run_round();
            return;
        }

        dispatch.requested += 1;
        let ticket = dispatch.requested;
        while dispatch.owner.is_some() {
            if dispatch.completed >= ticket {
                return;
            }
            self.inner.round_done.wait(&mut dispatch);
        }
        if dispatch.completed >= ticket {
            return;
        }
        dispatch.owner = Some(current);
        drop(dispatch);

        self.drain();
    }

    /// Run rounds until every requested one is delivered
    fn drain(&self) {
        let mut guard = DispatchGuard {
            dispatch: &self.inner.dispatch,
            round_done: &self.inner.round_done,
            armed: true,
        };
        loop {
            self.run_round();

            let mut dispatch = self.inner.dispatch.lock();
            dispatch.completed += 1;
            let finished = dispatch.completed >= dispatch.requested;
            if finished {
                dispatch.owner = None;
                guard.armed = false;
            }
            self.inner.round_done.notify_all();
            if finished {
                break;
            }
        }
    }

    fn run_round(&self) {
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in &listeners {
            listener();
        }
    }
}

impl<T: Send + Sync> ListenerRegistry for StoreInner<T> {
    fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        let removed = listeners.len() != before;
        if removed {
            tracing::debug!(store = %self.name, listener = %id, "listener unsubscribed");
        }
        removed
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.inner.name)
            .field("version", &self.inner.version.load(Ordering::Acquire))
            .field("listeners", &self.inner.listeners.lock().len())
            .finish_non_exhaustive()
    }
}
