//! lexdesk Views
//!
//! View-state stores of the three client feature areas, each a thin
//! configuration over [`lex_store::Store`]:
//!
//! - [`DocumentStore`]: selection, breadcrumb folder navigation, filters
//! - [`ResearchStore`]: query, filters, saved results, recent searches
//! - [`CommunicationStore`]: active conversation and per-conversation drafts
//! - [`StoreContext`]: one instance of each, built at the application root
//!
//! # Example
//!
//! ```rust
//! use lex_views::{StoreContext, ViewsConfig};
//!
//! let context = StoreContext::new(ViewsConfig::default());
//! let documents = context.documents();
//!
//! documents.navigate_to_folder("matters");
//! documents.navigate_to_folder("smith-v-jones");
//! documents.navigate_to_folder("matters");
//!
//! assert_eq!(documents.get_state().folder_path, vec!["matters".to_string()]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod communication;
pub mod config;
pub mod context;
pub mod documents;
pub mod error;
pub mod research;
pub mod types;

// Re-exports
pub use communication::{
    CommunicationPatch, CommunicationState, CommunicationStore, ConversationFilter, DraftMap,
};
pub use config::ViewsConfig;
pub use context::StoreContext;
pub use documents::{
    DocumentFilters, DocumentFiltersPatch, DocumentPatch, DocumentSort, DocumentState,
    DocumentStatus, DocumentStore, DocumentType, SortField,
};
pub use error::{ConfigError, ParseVariantError};
pub use research::{
    CourtLevel, ResearchFilters, ResearchFiltersPatch, ResearchPanel, ResearchPatch,
    ResearchState, ResearchStore, SearchType,
};
pub use types::{DateRange, IdSet, SortDirection, ViewMode};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with view stores
    pub use crate::{
        CommunicationStore, DocumentStore, ResearchStore, StoreContext, ViewMode, ViewsConfig,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
