//! lexdesk Features
//!
//! Feature facades used by the client's screens. Each one wraps a view store
//! from [`lex_views`] together with the remote service for the same area:
//!
//! - [`DocumentManager`]: document listing, bulk delete, preview
//! - [`ResearchWorkspace`]: case-law search, recent searches, bookmarks
//! - [`SecureMessenger`]: per-conversation drafts and delivery
//!
//! # Core Concepts
//!
//! - **View state** stays in the stores; it only parameterizes requests
//! - **Server data** is held per facade as a [`QueryState`]
//! - **Analytics** go through an [`AnalyticsSink`] chosen by the embedder
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_features::{SecureMessenger, TracingAnalytics};
//! use lex_views::StoreContext;
//! use std::sync::Arc;
//!
//! let context = StoreContext::default();
//! let messenger = SecureMessenger::new(&context, Arc::new(my_api), Arc::new(TracingAnalytics));
//!
//! messenger.open_conversation("c1");
//! messenger.type_draft("Draft attached.")?;
//! let delivered = messenger.send().await?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod analytics;
pub mod documents;
pub mod error;
pub mod messenger;
pub mod remote;
pub mod research;

// Re-exports
pub use analytics::{AnalyticsEvent, AnalyticsSink, RecordingAnalytics, TracingAnalytics};
pub use documents::{DocumentListing, DocumentManager};
pub use error::{ApiError, FeatureError};
pub use messenger::SecureMessenger;
pub use remote::{
    DocumentQuery, DocumentSummary, DocumentsApi, Message, MessagesApi, Page, QueryState,
    ResearchApi, SearchRequest, SearchResult, SendMessageRequest,
};
pub use research::{ResearchWorkspace, SearchResults};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with feature facades
    pub use crate::{
        AnalyticsSink, ApiError, DocumentManager, FeatureError, QueryState, ResearchWorkspace,
        SecureMessenger,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
