//! Async workflows
//!
//! Each workflow reads what it needs through the selector effect, performs
//! one backend request and dispatches the outcome. Errors never escape: an
//! application failure is recorded verbatim under the key it concerns, a
//! transport or parse failure under the same key with a fixed message.

use crate::actions::Action;
use crate::selectors;
use crate::state::{preview_error_key, PreviewEntry, SourceKey};
use crate::store::Store;
use podloom_client::{
    AjaxAction, AjaxRequest, ColorMode, Episode, RenderedHtml, Result, SubscribePreview,
};
use serde_json::Value;

pub const EPISODES_FALLBACK: &str = "Failed to load episodes";
pub const RENDER_FALLBACK: &str = "Failed to render episode";
pub const PREVIEW_FALLBACK: &str = "Failed to load subscribe links";

/// Fetch the next page of a source and append it
///
/// Skipped while a load for the same key is in flight, and once the
/// backend reported the last page. The loading flag is cleared on every
/// exit path.
pub async fn fetch_more_episodes(store: &Store, key: &SourceKey) {
    let effects = store.effects();
    let (loading, current_page, has_more, generation) = effects.select(|s| {
        (
            selectors::is_loading_episodes(s, key),
            selectors::get_current_page(s, key),
            selectors::has_more_episodes(s, key),
            selectors::get_episode_generation(s, key),
        )
    });

    if loading {
        log::debug!("Episodes for {} already loading, skipping", key);
        return;
    }
    if !has_more {
        log::debug!("No more episodes for {}", key);
        return;
    }

    let next = current_page + 1;
    store.dispatch(Action::set_episodes_loading(key.clone(), true));

    match store.episode_source(key).fetch_page(effects, next).await {
        Ok(page) => {
            store.dispatch(
                Action::append_episodes(key.clone(), page.items, next, page.has_more)
                    .in_generation(generation),
            );
            clear_error(store, &key.to_string());
        }
        Err(err) => {
            log::warn!("Failed to load page {} for {}: {}", next, key, err);
            store.dispatch(Action::set_error(
                key.to_string(),
                err.user_message(EPISODES_FALLBACK),
            ));
            settle_loading(store, key, generation);
        }
    }
}

fn render_request(episode: &Episode, attributes: &Value) -> Result<AjaxRequest> {
    Ok(AjaxRequest::post_form(AjaxAction::RenderRssEpisode)
        .param("episode_data", serde_json::to_string(episode)?)
        .param("attributes", attributes))
}

/// Server-render an RSS episode's markup once per `episode_key`
///
/// Concurrent calls for the same key share one request. After a failure
/// nothing is cached, so the next call tries again.
pub async fn fetch_rendered_episode_html(
    store: &Store,
    episode_key: &str,
    episode: &Episode,
    attributes: &Value,
) {
    let effects = store.effects();
    if effects.select(|s| selectors::get_rendered_episode_html(s, episode_key).is_some()) {
        log::debug!("Rendered HTML for {} cached", episode_key);
        return;
    }

    let in_flight_key = format!("render:{}", episode_key);
    store
        .join_in_flight(&in_flight_key, || async move {
            let rendered = match render_request(episode, attributes) {
                Ok(request) => effects.fetch::<RenderedHtml>(&request).await,
                Err(err) => Err(err),
            };

            match rendered {
                Ok(rendered) => {
                    store.dispatch(Action::set_rendered_episode_html(episode_key, rendered.html));
                    clear_error(store, episode_key);
                }
                Err(err) => {
                    log::warn!("Failed to render episode {}: {}", episode_key, err);
                    store.dispatch(Action::set_error(
                        episode_key,
                        err.user_message(RENDER_FALLBACK),
                    ));
                }
            }
        })
        .await;
}

/// Fetch subscribe links for a source in one color variant
///
/// A failed fetch still caches an empty entry for the variant, so the
/// block renders without buttons instead of waiting.
pub async fn fetch_subscribe_preview(
    store: &Store,
    source_id: &str,
    color_mode: ColorMode,
    custom_color: Option<&str>,
) {
    let effects = store.effects();
    let cached = effects.select(|s| {
        selectors::get_subscribe_preview(s, source_id, color_mode, custom_color).is_some()
    });
    if cached {
        log::debug!("Subscribe preview for {} ({}) cached", source_id, color_mode);
        return;
    }

    let mut request = AjaxRequest::post_form(AjaxAction::SubscribePreview)
        .param("source_id", source_id)
        .param("color_mode", color_mode);
    if let Some(color) = custom_color {
        request = request.param("custom_color", color);
    }

    let error_key = preview_error_key(source_id);
    let links = match effects.fetch::<SubscribePreview>(&request).await {
        Ok(preview) => {
            clear_error(store, &error_key);
            preview.links
        }
        Err(err) => {
            log::warn!("Failed to load subscribe links for {}: {}", source_id, err);
            store.dispatch(Action::set_error(
                error_key,
                err.user_message(PREVIEW_FALLBACK),
            ));
            Vec::new()
        }
    };

    store.dispatch(Action::set_subscribe_preview(
        source_id,
        PreviewEntry {
            links,
            color_mode,
            custom_color: custom_color.map(str::to_string),
        },
    ));
}

/// Clear the loading flag after a failed page request, unless the key was
/// reset meanwhile and the flag belongs to a newer request
pub(crate) fn settle_loading(store: &Store, key: &SourceKey, generation: u64) {
    if store.select(|s| selectors::get_episode_generation(s, key)) == generation {
        store.dispatch(Action::set_episodes_loading(key.clone(), false));
    }
}

/// Drop a stale error after a successful retry
pub(crate) fn clear_error(store: &Store, key: &str) {
    if store.select(|s| selectors::get_error(s, key).is_some()) {
        store.dispatch(Action::clear_error(key));
    }
}
