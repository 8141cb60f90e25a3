//! Store actions
//!
//! Every state transition is one of these variants. Constructors only shape
//! the payload; the async workflows that produce them live in
//! [`crate::workflows`].

use crate::state::{PlaylistKey, PreviewEntry, SourceKey};
use podloom_client::{Episode, Source, SubscribePodcast, Typography};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Bootstrap
    /// Bootstrap finished, successfully or not
    SetInitialDataLoaded,
    /// Transistor shows and RSS feeds
    SetSources {
        transistor: Vec<Source>,
        rss: Vec<Source>,
    },
    SetTypography(Option<Typography>),

    // Episode pages
    /// Replace a source's page wholesale
    SetEpisodes {
        key: SourceKey,
        items: Vec<Episode>,
        page: u32,
        has_more: bool,
        /// Generation of the key when the page was requested
        generation: u64,
    },
    /// Append the next page to a source
    AppendEpisodes {
        key: SourceKey,
        items: Vec<Episode>,
        page: u32,
        has_more: bool,
        generation: u64,
    },
    /// Forget a source's pages and start a new generation
    ResetEpisodes {
        key: SourceKey,
    },
    SetEpisodesLoading {
        key: SourceKey,
        loading: bool,
    },

    // Subscribe buttons
    SetSubscribePodcasts(Vec<SubscribePodcast>),
    SetSubscribePreview {
        source_id: String,
        entry: PreviewEntry,
    },

    // Rendered markup
    SetRenderedEpisodeHtml {
        key: String,
        html: String,
    },
    SetRenderedPlaylistHtml {
        key: PlaylistKey,
        html: String,
    },
    SetPlaylistHtmlLoading {
        key: PlaylistKey,
        loading: bool,
    },

    // Errors
    SetError {
        key: String,
        message: String,
    },
    ClearError {
        key: String,
    },

    /// No-op action
    None,
}

impl Action {
    pub fn set_initial_data_loaded() -> Self {
        Action::SetInitialDataLoaded
    }

    pub fn set_sources(transistor: Vec<Source>, rss: Vec<Source>) -> Self {
        Action::SetSources { transistor, rss }
    }

    pub fn set_typography(typography: Option<Typography>) -> Self {
        Action::SetTypography(typography)
    }

    pub fn set_episodes(key: SourceKey, items: Vec<Episode>, page: u32, has_more: bool) -> Self {
        Action::SetEpisodes {
            key,
            items,
            page,
            has_more,
            generation: 0,
        }
    }

    pub fn append_episodes(key: SourceKey, items: Vec<Episode>, page: u32, has_more: bool) -> Self {
        Action::AppendEpisodes {
            key,
            items,
            page,
            has_more,
            generation: 0,
        }
    }

    pub fn reset_episodes(key: SourceKey) -> Self {
        Action::ResetEpisodes { key }
    }

    /// Stamp a page action with the generation it was requested in.
    /// Other actions are returned unchanged.
    pub fn in_generation(mut self, requested_in: u64) -> Self {
        if let Action::SetEpisodes { generation, .. } | Action::AppendEpisodes { generation, .. } =
            &mut self
        {
            *generation = requested_in;
        }
        self
    }

    pub fn set_episodes_loading(key: SourceKey, loading: bool) -> Self {
        Action::SetEpisodesLoading { key, loading }
    }

    pub fn set_subscribe_podcasts(podcasts: Vec<SubscribePodcast>) -> Self {
        Action::SetSubscribePodcasts(podcasts)
    }

    pub fn set_subscribe_preview(source_id: impl Into<String>, entry: PreviewEntry) -> Self {
        Action::SetSubscribePreview {
            source_id: source_id.into(),
            entry,
        }
    }

    pub fn set_rendered_episode_html(key: impl Into<String>, html: impl Into<String>) -> Self {
        Action::SetRenderedEpisodeHtml {
            key: key.into(),
            html: html.into(),
        }
    }

    pub fn set_rendered_playlist_html(key: PlaylistKey, html: impl Into<String>) -> Self {
        Action::SetRenderedPlaylistHtml {
            key,
            html: html.into(),
        }
    }

    pub fn set_playlist_html_loading(key: PlaylistKey, loading: bool) -> Self {
        Action::SetPlaylistHtmlLoading { key, loading }
    }

    pub fn set_error(key: impl Into<String>, message: impl Into<String>) -> Self {
        Action::SetError {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn clear_error(key: impl Into<String>) -> Self {
        Action::ClearError { key: key.into() }
    }

    /// Short name for logging, without the payload
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetInitialDataLoaded => "SetInitialDataLoaded",
            Action::SetSources { .. } => "SetSources",
            Action::SetTypography(_) => "SetTypography",
            Action::SetEpisodes { .. } => "SetEpisodes",
            Action::AppendEpisodes { .. } => "AppendEpisodes",
            Action::ResetEpisodes { .. } => "ResetEpisodes",
            Action::SetEpisodesLoading { .. } => "SetEpisodesLoading",
            Action::SetSubscribePodcasts(_) => "SetSubscribePodcasts",
            Action::SetSubscribePreview { .. } => "SetSubscribePreview",
            Action::SetRenderedEpisodeHtml { .. } => "SetRenderedEpisodeHtml",
            Action::SetRenderedPlaylistHtml { .. } => "SetRenderedPlaylistHtml",
            Action::SetPlaylistHtmlLoading { .. } => "SetPlaylistHtmlLoading",
            Action::SetError { .. } => "SetError",
            Action::ClearError { .. } => "ClearError",
            Action::None => "None",
        }
    }
}
