//! lexdesk Harness
//!
//! Drives the view stores without a UI:
//!
//! - [`script`]: JSON action scripts
//! - [`replay`]: apply a script and report final states
//! - [`stress`]: concurrent writers against one store

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod replay;
pub mod script;
pub mod stress;

pub use error::HarnessError;
pub use replay::{replay, NotificationCounts, ReplayReport};
pub use script::{Action, Script};
pub use stress::{run_stress, StressReport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
