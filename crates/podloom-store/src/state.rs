//! Store state
//!
//! Keyed caches hold their entries behind `Arc` so the reducer can replace
//! one entry and share every other entry with the previous state.

use podloom_client::{ColorMode, Episode, Source, SubscribeLink, SubscribePodcast, Typography};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Error key for the bootstrap request
pub const INITIAL_DATA_ERROR_KEY: &str = "initial_data";

/// Error key for the subscribe podcast list
pub const SUBSCRIBE_PODCASTS_ERROR_KEY: &str = "subscribe_podcasts";

/// Error key for a subscribe preview
pub fn preview_error_key(source_id: &str) -> String {
    format!("preview:{}", source_id)
}

/// Error key for a rendered playlist
pub fn playlist_error_key(key: &PlaylistKey) -> String {
    format!("playlist:{}", key)
}

/// Where a podcast comes from
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum SourceKind {
    Transistor,
    Rss,
}

/// Composite `kind:id` key addressing one source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey {
    pub kind: SourceKind,
    pub id: String,
}

impl SourceKey {
    pub fn new(kind: SourceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn transistor(id: impl Into<String>) -> Self {
        Self::new(SourceKind::Transistor, id)
    }

    pub fn rss(id: impl Into<String>) -> Self {
        Self::new(SourceKind::Rss, id)
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

impl FromStr for SourceKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| format!("source key '{}' is not kind:id", s))?;
        let kind = kind
            .parse::<SourceKind>()
            .map_err(|_| format!("unknown source kind '{}'", kind))?;
        if id.is_empty() {
            return Err(format!("source key '{}' has an empty id", s));
        }
        Ok(SourceKey::new(kind, id))
    }
}

/// `feedId_maxEpisodes_order` key addressing one rendered playlist
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaylistKey {
    pub feed_id: String,
    pub max_episodes: u32,
    pub order: String,
}

impl PlaylistKey {
    pub fn new(feed_id: impl Into<String>, max_episodes: u32, order: impl Into<String>) -> Self {
        Self {
            feed_id: feed_id.into(),
            max_episodes,
            order: order.into(),
        }
    }
}

impl fmt::Display for PlaylistKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.feed_id, self.max_episodes, self.order)
    }
}

/// One source's fetched episodes plus pagination bookkeeping
///
/// Within a generation `page` never decreases, and `items` grows by
/// appending or is replaced as a whole; items are never reordered. A reset
/// starts a new generation and pages requested in an older one are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodePage {
    pub items: Vec<Episode>,
    pub page: u32,
    pub has_more: bool,
    pub loading: bool,
    pub generation: u64,
}

impl Default for EpisodePage {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            has_more: true,
            loading: false,
            generation: 0,
        }
    }
}

/// Cached subscribe links for one color variant
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewEntry {
    pub links: Vec<SubscribeLink>,
    pub color_mode: ColorMode,
    pub custom_color: Option<String>,
}

impl PreviewEntry {
    /// Whether this entry was fetched for the queried variant.
    /// `custom_color` only matters in custom mode.
    pub fn matches(&self, color_mode: ColorMode, custom_color: Option<&str>) -> bool {
        if self.color_mode != color_mode {
            return false;
        }
        color_mode != ColorMode::Custom || self.custom_color.as_deref() == custom_color
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sources {
    pub transistor: Vec<Source>,
    pub rss: Vec<Source>,
}

/// The whole store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub initial_data_loaded: bool,
    pub sources: Sources,
    /// `None` until bootstrap delivered typography settings
    pub typography: Option<Typography>,
    pub episodes_by_source: HashMap<SourceKey, Arc<EpisodePage>>,
    pub subscribe_podcasts: Vec<SubscribePodcast>,
    pub subscribe_previews: HashMap<String, Arc<PreviewEntry>>,
    pub rendered_episode_html: HashMap<String, Arc<str>>,
    pub rendered_playlist_html: HashMap<PlaylistKey, Arc<str>>,
    pub playlist_html_loading: HashMap<PlaylistKey, bool>,
    pub errors: HashMap<String, String>,
}
