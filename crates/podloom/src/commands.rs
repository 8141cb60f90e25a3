//! Subcommand handlers
//!
//! Each handler drives the store the way a block would (resolving selectors
//! first, then workflows) and turns the resulting state into JSON. A failure
//! the store recorded under the handler's key becomes the command's error.

use crate::cli::Command;
use anyhow::{bail, Context, Result};
use podloom_client::ColorMode;
use podloom_store::state::{preview_error_key, INITIAL_DATA_ERROR_KEY, SUBSCRIBE_PODCASTS_ERROR_KEY};
use podloom_store::{selectors, workflows, SourceKey, Store};
use serde_json::{json, Value};

pub async fn run(store: &Store, command: Command) -> Result<Value> {
    match command {
        Command::Sources => sources(store).await,
        Command::Episodes { kind, id, pages } => {
            episodes(store, SourceKey::new(kind, id), pages).await
        }
        Command::Preview {
            source_id,
            color_mode,
            custom_color,
        } => preview(store, &source_id, color_mode, custom_color.as_deref()).await,
        Command::Podcasts => podcasts(store).await,
        Command::Render {
            feed_id,
            episode_id,
            attributes,
        } => render(store, &feed_id, &episode_id, &attributes).await,
    }
}

fn recorded_error(store: &Store, key: &str) -> Result<()> {
    match store.select(|s| selectors::get_error(s, key).map(str::to_string)) {
        Some(message) => bail!(message),
        None => Ok(()),
    }
}

async fn sources(store: &Store) -> Result<Value> {
    let (transistor, rss) = store.sources().await;
    recorded_error(store, INITIAL_DATA_ERROR_KEY)?;

    Ok(json!({
        "transistor": transistor,
        "rss": rss,
        "typography": store.select(|s| selectors::get_typography(s).cloned()),
    }))
}

/// Fetch the page after the current one, failing if paging did not advance
async fn load_next_page(store: &Store, key: &SourceKey) -> Result<()> {
    let before = store.select(|s| selectors::get_current_page(s, key));
    workflows::fetch_more_episodes(store, key).await;
    recorded_error(store, &key.to_string())?;

    if store.select(|s| selectors::get_current_page(s, key)) <= before {
        bail!("Stopped paging {} at page {}", key, before);
    }
    Ok(())
}

/// Load up to `pages` pages, stopping early at the last one
async fn load_pages(store: &Store, key: &SourceKey, pages: u32) -> Result<()> {
    store.episodes(key).await;
    recorded_error(store, &key.to_string())?;

    for _ in 1..pages {
        if !store.select(|s| selectors::has_more_episodes(s, key)) {
            break;
        }
        load_next_page(store, key).await?;
    }
    Ok(())
}

async fn episodes(store: &Store, key: SourceKey, pages: u32) -> Result<Value> {
    load_pages(store, &key, pages.max(1)).await?;

    Ok(store.select(|s| {
        json!({
            "source": key.to_string(),
            "page": selectors::get_current_page(s, &key),
            "has_more": selectors::has_more_episodes(s, &key),
            "episodes": selectors::get_episodes(s, &key),
        })
    }))
}

async fn preview(
    store: &Store,
    source_id: &str,
    color_mode: ColorMode,
    custom_color: Option<&str>,
) -> Result<Value> {
    workflows::fetch_subscribe_preview(store, source_id, color_mode, custom_color).await;
    recorded_error(store, &preview_error_key(source_id))?;

    let links = store.select(|s| {
        selectors::get_subscribe_preview(s, source_id, color_mode, custom_color)
            .map(<[_]>::to_vec)
            .unwrap_or_default()
    });
    Ok(json!(links))
}

async fn podcasts(store: &Store) -> Result<Value> {
    let podcasts = store.subscribe_podcasts().await;
    recorded_error(store, SUBSCRIBE_PODCASTS_ERROR_KEY)?;
    Ok(json!(podcasts))
}

async fn render(store: &Store, feed_id: &str, episode_id: &str, attributes: &str) -> Result<Value> {
    let attributes: Value =
        serde_json::from_str(attributes).context("--attributes is not valid JSON")?;
    let key = SourceKey::rss(feed_id);

    store.episodes(&key).await;
    recorded_error(store, &key.to_string())?;

    // The episode may sit on a later page
    let find = || {
        store.select(|s| {
            selectors::get_episodes(s, &key)
                .iter()
                .find(|e| e.id == episode_id)
                .cloned()
        })
    };
    let mut episode = find();
    while episode.is_none() && store.select(|s| selectors::has_more_episodes(s, &key)) {
        load_next_page(store, &key).await?;
        episode = find();
    }
    let Some(episode) = episode else {
        bail!("Episode {} not found in feed {}", episode_id, feed_id);
    };

    let html_key = format!("{}:{}", feed_id, episode_id);
    workflows::fetch_rendered_episode_html(store, &html_key, &episode, &attributes).await;
    recorded_error(store, &html_key)?;

    let html = store.select(|s| selectors::get_rendered_episode_html(s, &html_key).map(str::to_string));
    Ok(json!({ "episode": episode.id, "html": html }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use podloom_client::{AjaxAction, AjaxRequest, AjaxTransport};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Two-page RSS feed with a render endpoint
    struct FeedBackend;

    #[async_trait]
    impl AjaxTransport for FeedBackend {
        async fn send(&self, request: &AjaxRequest) -> podloom_client::Result<String> {
            let body = match request.action {
                AjaxAction::RssEpisodes => match request.param_value("page") {
                    Some("1") => json!({"success": true, "data": {
                        "episodes": [{"id": "a", "title": "A"}], "page": 1, "pages": 2
                    }}),
                    _ => json!({"success": true, "data": {
                        "episodes": [{"id": "b", "title": "B"}], "page": 2, "pages": 2
                    }}),
                },
                AjaxAction::RenderRssEpisode => {
                    json!({"success": true, "data": {"html": "<article>B</article>"}})
                }
                _ => json!({"success": false, "data": {"message": "Not available"}}),
            };
            Ok(body.to_string())
        }
    }

    fn store() -> Store {
        Store::new(Arc::new(FeedBackend))
    }

    /// Claims three pages but answers page 1 whatever was asked for
    struct StuckBackend {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AjaxTransport for StuckBackend {
        async fn send(&self, _request: &AjaxRequest) -> podloom_client::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({"success": true, "data": {
                "episodes": [{"id": "a", "title": "A"}], "page": 1, "pages": 3
            }})
            .to_string())
        }
    }

    /// Serves the first page, then fails
    struct FailingSecondPageBackend;

    #[async_trait]
    impl AjaxTransport for FailingSecondPageBackend {
        async fn send(&self, request: &AjaxRequest) -> podloom_client::Result<String> {
            let body = match request.param_value("page") {
                Some("1") => json!({"success": true, "data": {
                    "episodes": [{"id": "a", "title": "A"}], "page": 1, "pages": 2
                }}),
                _ => json!({"success": false, "data": {"message": "Feed unavailable"}}),
            };
            Ok(body.to_string())
        }
    }

    #[tokio::test]
    async fn test_episodes_loads_requested_pages() {
        let output = run(
            &store(),
            Command::Episodes {
                kind: podloom_store::SourceKind::Rss,
                id: "feed".to_string(),
                pages: 5,
            },
        )
        .await
        .unwrap();

        assert_eq!(output["page"], 2);
        assert_eq!(output["has_more"], false);
        assert_eq!(output["episodes"][1]["id"], "b");
        assert_eq!(output["episodes"][1]["type"], "rss_episode");
    }

    #[tokio::test]
    async fn test_render_searches_later_pages() {
        let output = run(
            &store(),
            Command::Render {
                feed_id: "feed".to_string(),
                episode_id: "b".to_string(),
                attributes: "{}".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(output["html"], "<article>B</article>");
    }

    #[tokio::test]
    async fn test_render_unknown_episode_fails() {
        let result = run(
            &store(),
            Command::Render {
                feed_id: "feed".to_string(),
                episode_id: "zz".to_string(),
                attributes: "{}".to_string(),
            },
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_render_terminates_when_backend_repeats_page() {
        let backend = Arc::new(StuckBackend {
            calls: AtomicUsize::new(0),
        });
        let store = Store::new(backend.clone());

        let err = run(
            &store,
            Command::Render {
                feed_id: "feed".to_string(),
                episode_id: "zz".to_string(),
                attributes: "{}".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Episode zz not found in feed feed");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_render_stops_on_page_error() {
        let err = run(
            &Store::new(Arc::new(FailingSecondPageBackend)),
            Command::Render {
                feed_id: "feed".to_string(),
                episode_id: "zz".to_string(),
                attributes: "{}".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Feed unavailable");
    }

    #[tokio::test]
    async fn test_recorded_error_becomes_command_error() {
        let err = run(&store(), Command::Podcasts).await.unwrap_err();
        assert_eq!(err.to_string(), "Not available");
    }
}
