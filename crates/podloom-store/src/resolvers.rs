//! Resolvers
//!
//! Lazy loaders behind the store's resolving selectors. The store runs each
//! one at most once per key; the resolvers themselves only fetch and
//! dispatch. Every failure path still leaves the state in a "settled" shape
//! (loaded flag set, loading cleared, empty list) so nothing waits forever.

use crate::actions::Action;
use crate::selectors;
use crate::state::{SourceKey, INITIAL_DATA_ERROR_KEY, SUBSCRIBE_PODCASTS_ERROR_KEY};
use crate::store::Store;
use crate::workflows::{clear_error, settle_loading, EPISODES_FALLBACK};
use podloom_client::{AjaxAction, AjaxRequest, BlockInitData, SubscribePodcast};

pub const INITIAL_DATA_FALLBACK: &str = "Failed to load podcast sources";
pub const SUBSCRIBE_PODCASTS_FALLBACK: &str = "Failed to load podcasts";

/// Sources and typography shared by every block on the page
pub async fn resolve_initial_data(store: &Store) {
    let request = AjaxRequest::get(AjaxAction::BlockInitData);

    match store.effects().fetch::<BlockInitData>(&request).await {
        Ok(data) => {
            log::debug!(
                "Loaded {} Transistor shows and {} RSS feeds",
                data.transistor_shows.len(),
                data.rss_feeds.len()
            );
            store.dispatch(Action::set_sources(data.transistor_shows, data.rss_feeds));
            store.dispatch(Action::set_typography(data.typography));
            clear_error(store, INITIAL_DATA_ERROR_KEY);
        }
        Err(err) => {
            log::warn!("Failed to load block init data: {}", err);
            store.dispatch(Action::set_error(
                INITIAL_DATA_ERROR_KEY,
                err.user_message(INITIAL_DATA_FALLBACK),
            ));
        }
    }

    store.dispatch(Action::set_initial_data_loaded());
}

/// First page of a source, replacing whatever was stored
pub async fn resolve_episodes(store: &Store, key: &SourceKey) {
    let generation = store.select(|s| selectors::get_episode_generation(s, key));
    store.dispatch(Action::set_episodes_loading(key.clone(), true));

    match store.episode_source(key).fetch_page(store.effects(), 1).await {
        Ok(page) => {
            store.dispatch(
                Action::set_episodes(key.clone(), page.items, page.page, page.has_more)
                    .in_generation(generation),
            );
            clear_error(store, &key.to_string());
        }
        Err(err) => {
            log::warn!("Failed to load episodes for {}: {}", key, err);
            store.dispatch(Action::set_error(
                key.to_string(),
                err.user_message(EPISODES_FALLBACK),
            ));
            settle_loading(store, key, generation);
        }
    }
}

/// Podcasts selectable in the subscribe-buttons block
pub async fn resolve_subscribe_podcasts(store: &Store) {
    let request = AjaxRequest::get(AjaxAction::SubscribePodcasts);

    let podcasts = match store
        .effects()
        .fetch::<Vec<SubscribePodcast>>(&request)
        .await
    {
        Ok(podcasts) => {
            clear_error(store, SUBSCRIBE_PODCASTS_ERROR_KEY);
            podcasts
        }
        Err(err) => {
            log::warn!("Failed to load subscribe podcasts: {}", err);
            store.dispatch(Action::set_error(
                SUBSCRIBE_PODCASTS_ERROR_KEY,
                err.user_message(SUBSCRIBE_PODCASTS_FALLBACK),
            ));
            Vec::new()
        }
    };

    store.dispatch(Action::set_subscribe_podcasts(podcasts));
}
