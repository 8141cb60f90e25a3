use crate::actions::Action;
use crate::state::{EpisodePage, SourceKey, StoreState};
use std::sync::Arc;

/// Reducer - pure function that produces new state from current state + action
///
/// Only the entry an action addresses is rebuilt; all other entries of the
/// keyed caches keep pointing at the same `Arc` as in the input state.
pub fn reduce(mut state: StoreState, action: &Action) -> StoreState {
    match action {
        Action::SetInitialDataLoaded => {
            state.initial_data_loaded = true;
        }

        Action::SetSources { transistor, rss } => {
            state.sources.transistor = transistor.clone();
            state.sources.rss = rss.clone();
        }

        Action::SetTypography(typography) => {
            state.typography = typography.clone();
        }

        Action::SetEpisodes {
            key,
            items,
            page,
            has_more,
            generation,
        } => {
            if from_older_generation(&state, key, *generation) {
                return state;
            }
            let current = current_page(&state, key);
            let next = match current.filter(|c| c.page > *page) {
                Some(current) => {
                    log::debug!(
                        "Dropping stale page {} for {} (already at page {})",
                        page,
                        key,
                        current.page
                    );
                    EpisodePage {
                        loading: false,
                        ..current.clone()
                    }
                }
                None => EpisodePage {
                    items: items.clone(),
                    page: *page,
                    has_more: *has_more,
                    loading: false,
                    generation: *generation,
                },
            };
            state.episodes_by_source.insert(key.clone(), Arc::new(next));
        }

        Action::AppendEpisodes {
            key,
            items,
            page,
            has_more,
            generation,
        } => {
            if from_older_generation(&state, key, *generation) {
                return state;
            }
            let mut next = current_page(&state, key)
                .cloned()
                .unwrap_or_else(|| EpisodePage {
                    generation: *generation,
                    ..EpisodePage::default()
                });
            next.loading = false;
            if *page <= next.page {
                log::debug!(
                    "Dropping duplicate or stale page {} for {} (already at page {})",
                    page,
                    key,
                    next.page
                );
            } else {
                next.items.extend(items.iter().cloned());
                next.page = *page;
                next.has_more = *has_more;
            }
            state.episodes_by_source.insert(key.clone(), Arc::new(next));
        }

        Action::ResetEpisodes { key } => {
            let generation = current_page(&state, key).map_or(0, |p| p.generation) + 1;
            state.episodes_by_source.insert(
                key.clone(),
                Arc::new(EpisodePage {
                    generation,
                    ..EpisodePage::default()
                }),
            );
        }

        Action::SetEpisodesLoading { key, loading } => {
            let mut next = current_page(&state, key).cloned().unwrap_or_default();
            next.loading = *loading;
            state.episodes_by_source.insert(key.clone(), Arc::new(next));
        }

        Action::SetSubscribePodcasts(podcasts) => {
            state.subscribe_podcasts = podcasts.clone();
        }

        Action::SetSubscribePreview { source_id, entry } => {
            state
                .subscribe_previews
                .insert(source_id.clone(), Arc::new(entry.clone()));
        }

        Action::SetRenderedEpisodeHtml { key, html } => {
            state
                .rendered_episode_html
                .insert(key.clone(), Arc::from(html.as_str()));
        }

        Action::SetRenderedPlaylistHtml { key, html } => {
            state
                .rendered_playlist_html
                .insert(key.clone(), Arc::from(html.as_str()));
            state.playlist_html_loading.insert(key.clone(), false);
        }

        Action::SetPlaylistHtmlLoading { key, loading } => {
            state.playlist_html_loading.insert(key.clone(), *loading);
        }

        Action::SetError { key, message } => {
            state.errors.insert(key.clone(), message.clone());
        }

        Action::ClearError { key } => {
            state.errors.remove(key);
        }

        Action::None => {}
    }

    state
}

fn current_page<'a>(state: &'a StoreState, key: &SourceKey) -> Option<&'a EpisodePage> {
    state.episodes_by_source.get(key).map(Arc::as_ref)
}

/// A page requested before the key was reset. Leaves the state untouched,
/// including the loading flag of the current generation.
fn from_older_generation(state: &StoreState, key: &SourceKey, generation: u64) -> bool {
    match current_page(state, key) {
        Some(current) if current.generation != generation => {
            log::debug!(
                "Dropping page for {} from generation {} (now {})",
                key,
                generation,
                current.generation
            );
            true
        }
        _ => false,
    }
}
