//! Backend transport for podloom blocks
//!
//! This crate provides a trait-based transport to the block backend, the
//! request model shared by every endpoint, the `{success, data}` envelope,
//! and the wire types episodes, sources and subscribe links decode into.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              AjaxTransport trait             │
//! │  - send(&AjaxRequest) -> body                │
//! └──────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//! ┌─────────────────┐         ┌─────────────────────┐
//! │ ReqwestTransport│         │ test doubles        │
//! │ (HTTP)          │         │ (canned bodies)     │
//! └─────────────────┘         └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use podloom_client::{AjaxAction, AjaxRequest, AjaxTransport, Envelope, ReqwestTransport};
//! use podloom_config::AppConfig;
//!
//! # async fn example() -> podloom_client::Result<()> {
//! let transport = ReqwestTransport::from_config(&AppConfig::load())?;
//! let request = AjaxRequest::get(AjaxAction::BlockInitData);
//! let body = transport.send(&request).await?;
//! let payload = Envelope::classify(serde_json::from_str(&body)?).into_payload()?;
//! # let _ = payload;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod envelope;
pub mod error;
pub mod reqwest_client;
pub mod types;

pub use client::{AjaxAction, AjaxRequest, AjaxTransport, HttpMethod};
pub use envelope::Envelope;
pub use error::{Error, Result};
pub use reqwest_client::ReqwestTransport;
pub use types::{
    BlockInitData, ColorMode, Episode, EpisodeAttributes, PageMeta, RenderedHtml, RssEpisode,
    RssEpisodeList, Source, SubscribeLink, SubscribePodcast, SubscribePreview,
    TransistorEpisodeList, Typography, RSS_EPISODE_TYPE,
};
