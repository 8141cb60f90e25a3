//! Selectors
//!
//! Pure reads over [`StoreState`]. None of them fail on data that has not
//! been loaded yet; they fall back to empty slices, `false` or `None`, so
//! callers can render before any resolver has finished.

use crate::state::{EpisodePage, PlaylistKey, SourceKey, StoreState};
use podloom_client::{ColorMode, Episode, Source, SubscribeLink, SubscribePodcast, Typography};
use std::collections::HashMap;

pub fn is_initial_data_loaded(state: &StoreState) -> bool {
    state.initial_data_loaded
}

pub fn get_transistor_sources(state: &StoreState) -> &[Source] {
    &state.sources.transistor
}

pub fn get_rss_feeds(state: &StoreState) -> &[Source] {
    &state.sources.rss
}

/// Transistor shows first, then RSS feeds
pub fn get_all_sources(state: &StoreState) -> Vec<(SourceKey, &Source)> {
    state
        .sources
        .transistor
        .iter()
        .map(|s| (SourceKey::transistor(s.id.clone()), s))
        .chain(
            state
                .sources
                .rss
                .iter()
                .map(|s| (SourceKey::rss(s.id.clone()), s)),
        )
        .collect()
}

pub fn get_typography(state: &StoreState) -> Option<&Typography> {
    state.typography.as_ref()
}

pub fn get_episode_page<'a>(state: &'a StoreState, key: &SourceKey) -> Option<&'a EpisodePage> {
    state.episodes_by_source.get(key).map(|page| page.as_ref())
}

pub fn get_episodes<'a>(state: &'a StoreState, key: &SourceKey) -> &'a [Episode] {
    get_episode_page(state, key)
        .map(|page| page.items.as_slice())
        .unwrap_or(&[])
}

/// Last fetched page number, 0 before the first fetch
pub fn get_current_page(state: &StoreState, key: &SourceKey) -> u32 {
    get_episode_page(state, key).map_or(0, |page| page.page)
}

/// Bumped each time the source's list is reset
pub fn get_episode_generation(state: &StoreState, key: &SourceKey) -> u64 {
    get_episode_page(state, key).map_or(0, |page| page.generation)
}

pub fn is_loading_episodes(state: &StoreState, key: &SourceKey) -> bool {
    get_episode_page(state, key).is_some_and(|page| page.loading)
}

/// `true` for a key that was never fetched, so "load more" shows up
/// before the first response arrives
pub fn has_more_episodes(state: &StoreState, key: &SourceKey) -> bool {
    get_episode_page(state, key).is_none_or(|page| page.has_more)
}

pub fn get_latest_episode<'a>(state: &'a StoreState, key: &SourceKey) -> Option<&'a Episode> {
    get_episodes(state, key).first()
}

pub fn get_subscribe_podcasts(state: &StoreState) -> &[SubscribePodcast] {
    &state.subscribe_podcasts
}

/// Cached links for a source and color variant
///
/// `None` when nothing is cached or the cached entry was fetched for a
/// different `color_mode` (or a different `custom_color` in custom mode).
/// `Some(&[])` is a valid, cached empty result.
pub fn get_subscribe_preview<'a>(
    state: &'a StoreState,
    source_id: &str,
    color_mode: ColorMode,
    custom_color: Option<&str>,
) -> Option<&'a [SubscribeLink]> {
    state
        .subscribe_previews
        .get(source_id)
        .filter(|entry| entry.matches(color_mode, custom_color))
        .map(|entry| entry.links.as_slice())
}

pub fn get_rendered_episode_html<'a>(state: &'a StoreState, key: &str) -> Option<&'a str> {
    state.rendered_episode_html.get(key).map(|html| &**html)
}

pub fn get_rendered_playlist_html<'a>(state: &'a StoreState, key: &PlaylistKey) -> Option<&'a str> {
    state.rendered_playlist_html.get(key).map(|html| &**html)
}

pub fn is_playlist_html_loading(state: &StoreState, key: &PlaylistKey) -> bool {
    state
        .playlist_html_loading
        .get(key)
        .copied()
        .unwrap_or(false)
}

pub fn get_error<'a>(state: &'a StoreState, key: &str) -> Option<&'a str> {
    state.errors.get(key).map(String::as_str)
}

pub fn get_errors(state: &StoreState) -> &HashMap<String, String> {
    &state.errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Action;
    use crate::reducer::reduce;
    use crate::state::PreviewEntry;
    use crate::test_support::{episode, link, source};

    #[test]
    fn test_defaults_on_empty_state() {
        let state = StoreState::default();
        let key = SourceKey::rss("never-seen");

        assert!(!is_initial_data_loaded(&state));
        assert!(get_all_sources(&state).is_empty());
        assert!(get_typography(&state).is_none());
        assert!(get_episodes(&state, &key).is_empty());
        assert_eq!(get_current_page(&state, &key), 0);
        assert!(!is_loading_episodes(&state, &key));
        assert!(has_more_episodes(&state, &key));
        assert!(get_latest_episode(&state, &key).is_none());
        assert!(get_subscribe_preview(&state, "1", ColorMode::Brand, None).is_none());
        assert!(get_rendered_episode_html(&state, "ep").is_none());
        assert!(!is_playlist_html_loading(&state, &PlaylistKey::new("f", 5, "desc")));
        assert!(get_error(&state, "rss:never-seen").is_none());
    }

    #[test]
    fn test_has_more_follows_page_data() {
        let key = SourceKey::transistor("1");
        let state = reduce(
            StoreState::default(),
            &Action::set_episodes(key.clone(), vec![episode("a")], 1, false),
        );
        assert!(!has_more_episodes(&state, &key));
        assert_eq!(get_current_page(&state, &key), 1);
        assert_eq!(get_latest_episode(&state, &key).map(|e| e.id.as_str()), Some("a"));
    }

    #[test]
    fn test_all_sources_order_and_keys() {
        let state = reduce(
            StoreState::default(),
            &Action::set_sources(vec![source("7", "Show")], vec![source("f", "Feed")]),
        );
        let keys: Vec<String> = get_all_sources(&state)
            .into_iter()
            .map(|(key, _)| key.to_string())
            .collect();
        assert_eq!(keys, vec!["transistor:7", "rss:f"]);
        assert_eq!(get_transistor_sources(&state)[0].name, "Show");
        assert_eq!(get_rss_feeds(&state)[0].name, "Feed");
    }

    #[test]
    fn test_subscribe_preview_variant_mismatch_is_none() {
        let state = reduce(
            StoreState::default(),
            &Action::set_subscribe_preview(
                "show-1",
                PreviewEntry {
                    links: vec![link("apple")],
                    color_mode: ColorMode::Custom,
                    custom_color: Some("#ff0000".to_string()),
                },
            ),
        );

        let hit = get_subscribe_preview(&state, "show-1", ColorMode::Custom, Some("#ff0000"));
        assert_eq!(hit.map(|links| links.len()), Some(1));

        assert!(get_subscribe_preview(&state, "show-1", ColorMode::Custom, Some("#00ff00")).is_none());
        assert!(get_subscribe_preview(&state, "show-1", ColorMode::Brand, None).is_none());
    }

    #[test]
    fn test_subscribe_preview_cached_empty_is_some() {
        let state = reduce(
            StoreState::default(),
            &Action::set_subscribe_preview(
                "show-1",
                PreviewEntry {
                    links: vec![],
                    color_mode: ColorMode::Black,
                    custom_color: None,
                },
            ),
        );
        assert_eq!(
            get_subscribe_preview(&state, "show-1", ColorMode::Black, None),
            Some(&[][..])
        );
    }

    #[test]
    fn test_errors() {
        let state = reduce(StoreState::default(), &Action::set_error("rss:a", "Feed gone"));
        assert_eq!(get_error(&state, "rss:a"), Some("Feed gone"));
        assert_eq!(get_errors(&state).len(), 1);
    }
}
