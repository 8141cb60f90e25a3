//! Episode sources
//!
//! One variant per source kind, each knowing its endpoint, its parameter
//! convention and its pagination fields. Transistor shows are paged with a
//! GET query string; RSS feeds with a form POST. The two backends report
//! pagination differently (`meta.totalPages` vs `pages`), both end up as
//! [`FetchedPage::has_more`].
//!
//! A decoded page always carries the page number that was requested. The
//! backend's own page number is only logged when it disagrees, so a
//! backend that keeps answering with the same page cannot stall paging.

use crate::effects::Effects;
use crate::state::{SourceKey, SourceKind};
use podloom_client::{
    AjaxAction, AjaxRequest, Episode, Result, RssEpisodeList, TransistorEpisodeList,
};
use serde_json::Value;

/// One page of episodes, already normalized
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub items: Vec<Episode>,
    pub page: u32,
    pub has_more: bool,
}

impl FetchedPage {
    pub fn next_page(&self) -> Option<u32> {
        self.has_more.then_some(self.page + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpisodeSource {
    Transistor { show_id: String },
    Rss { feed_id: String, per_page: u32 },
}

impl EpisodeSource {
    pub fn for_key(key: &SourceKey, rss_per_page: u32) -> Self {
        match key.kind {
            SourceKind::Transistor => EpisodeSource::Transistor {
                show_id: key.id.clone(),
            },
            SourceKind::Rss => EpisodeSource::Rss {
                feed_id: key.id.clone(),
                per_page: rss_per_page,
            },
        }
    }

    pub fn key(&self) -> SourceKey {
        match self {
            EpisodeSource::Transistor { show_id } => SourceKey::transistor(show_id.clone()),
            EpisodeSource::Rss { feed_id, .. } => SourceKey::rss(feed_id.clone()),
        }
    }

    /// Backend request for `page` (1-based)
    pub fn request(&self, page: u32) -> AjaxRequest {
        match self {
            EpisodeSource::Transistor { show_id } => {
                AjaxRequest::get(AjaxAction::TransistorEpisodes)
                    .param("show_id", show_id)
                    .param("page", page)
            }
            EpisodeSource::Rss { feed_id, per_page } => {
                AjaxRequest::post_form(AjaxAction::RssEpisodes)
                    .param("feed_id", feed_id)
                    .param("page", page)
                    .param("per_page", per_page)
            }
        }
    }

    /// Decode an unwrapped payload fetched for page `requested`
    ///
    /// Without a page total the page is taken to be the last one.
    pub fn decode_page(&self, payload: Value, requested: u32) -> Result<FetchedPage> {
        let (items, reported, total) = match self {
            EpisodeSource::Transistor { .. } => {
                let list: TransistorEpisodeList = serde_json::from_value(payload)?;
                (list.data, list.meta.current_page, list.meta.total_pages)
            }
            EpisodeSource::Rss { .. } => {
                let list: RssEpisodeList = serde_json::from_value(payload)?;
                let items = list.episodes.into_iter().map(Episode::from).collect();
                (items, list.page, list.pages)
            }
        };

        if let Some(reported) = reported.filter(|&p| p != requested) {
            log::debug!(
                "{} answered page {} for page {}",
                self.key(),
                reported,
                requested
            );
        }

        Ok(FetchedPage {
            items,
            page: requested,
            has_more: requested < total.unwrap_or(requested),
        })
    }

    /// Fetch and decode one page through the effect interpreter
    pub async fn fetch_page(&self, effects: &Effects, page: u32) -> Result<FetchedPage> {
        let body = effects.request(&self.request(page)).await?;
        let payload = effects.parse_json(&body)?.into_payload()?;
        self.decode_page(payload, page)
    }
}
