//! lexdesk Store
//!
//! Minimal observable state container shared by every lexdesk feature area.
//!
//! # Core Concepts
//!
//! - [`Store`]: Cheaply cloneable handle over a typed state snapshot
//! - [`Merge`]: Shallow merge of a generated patch type into a state value
//! - [`define_state!`]: Declares a state struct together with its patch type
//! - [`Subscription`]: Listener registration, released explicitly or on drop
//! - [`Binding`]: Render adapter turning notifications into re-render requests
//! - [`persist`]: Optional JSON snapshot hook composed from the outside
//!
//! # Example
//!
//! ```rust
//! use lex_store::{define_state, Store};
//!
//! define_state! {
//!     /// Counter state
//!     #[derive(Debug, Clone, Default, PartialEq)]
//!     pub struct Counter, patch CounterPatch {
//!         /// Current count
//!         pub count: u32,
//!         /// Display label
//!         pub label: String,
//!     }
//! }
//!
//! let store = Store::new(Counter::default());
//! let subscription = store.subscribe(|| println!("changed"));
//!
//! store.update(|s| CounterPatch { count: Some(s.count + 1), ..Default::default() });
//! assert_eq!(store.get_state().count, 1);
//!
//! subscription.unsubscribe();
//! assert_eq!(store.listener_count(), 0);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod binding;
pub mod error;
mod patch;
pub mod persist;
mod store;
mod subscription;

// Re-exports
pub use binding::{use_store, use_store_with, Binding};
pub use error::PersistError;
pub use patch::Merge;
pub use store::{ReentrancyPolicy, Store, StoreConfig};
pub use subscription::{ListenerId, Subscription};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for declaring and using stores
    pub use crate::{define_state, Binding, Merge, ReentrancyPolicy, Store, StoreConfig, Subscription};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Check if re-entrant updates panic (development builds)
pub const fn strict_debug() -> bool {
    cfg!(feature = "strict-debug")
}
