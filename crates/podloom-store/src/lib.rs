//! Data store for podloom player blocks
//!
//! Redux-style: every state change is an [`Action`] run through the
//! middleware chain and the pure [`reduce`] function. Reads go through
//! [`selectors`]. Network access happens only in [`workflows`] and
//! [`resolvers`], and only through the [`Effects`] the store hands them.
//!
//! ```text
//! workflow / resolver ──► Effects ──► AjaxTransport
//!          │
//!          ▼
//!   Store::dispatch ──► middleware ──► reduce ──► watch channel ──► subscribers
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use podloom_client::ReqwestTransport;
//! use podloom_config::AppConfig;
//! use podloom_store::{workflows, SourceKey, Store};
//! use std::sync::Arc;
//!
//! # async fn example() -> podloom_client::Result<()> {
//! let store = Store::new(Arc::new(ReqwestTransport::from_config(&AppConfig::load())?));
//! let key = SourceKey::rss("my-feed");
//! let first_page = store.episodes(&key).await;
//! workflows::fetch_more_episodes(&store, &key).await;
//! # let _ = first_page;
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod effects;
pub mod middleware;
pub mod reducer;
pub mod resolvers;
pub mod selectors;
pub mod source;
pub mod state;
pub mod store;
pub mod workflows;

#[cfg(test)]
mod test_support;

pub use actions::Action;
pub use effects::Effects;
pub use middleware::{LoggingMiddleware, Middleware};
pub use reducer::reduce;
pub use source::{EpisodeSource, FetchedPage};
pub use state::{
    EpisodePage, PlaylistKey, PreviewEntry, SourceKey, SourceKind, Sources, StoreState,
};
pub use store::{ResolverKey, Store, DEFAULT_RSS_PER_PAGE};
