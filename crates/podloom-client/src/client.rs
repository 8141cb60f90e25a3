//! Backend transport trait and request model
//!
//! Every backend call is described by an [`AjaxRequest`]: the endpoint
//! discriminator, whether it goes out as a query string or a form body, and
//! its parameters. The nonce is attached by the transport, never by callers.

use crate::error::Result;
use async_trait::async_trait;

/// Endpoint discriminator sent as the `action` parameter
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
pub enum AjaxAction {
    /// Sources and typography for block bootstrap
    #[strum(serialize = "podloom_get_block_init_data")]
    BlockInitData,
    /// One page of episodes for a Transistor show
    #[strum(serialize = "podloom_get_episodes")]
    TransistorEpisodes,
    /// One page of episodes for an RSS feed
    #[strum(serialize = "podloom_get_rss_episodes")]
    RssEpisodes,
    /// Server-rendered player markup for one RSS episode
    #[strum(serialize = "podloom_render_rss_episode")]
    RenderRssEpisode,
    /// Podcasts that offer subscribe buttons
    #[strum(serialize = "podloom_get_subscribe_podcasts")]
    SubscribePodcasts,
    /// Subscribe links rendered for a color variant
    #[strum(serialize = "podloom_get_subscribe_preview")]
    SubscribePreview,
}

/// How the parameters travel to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET with a query string
    Get,
    /// POST with an `application/x-www-form-urlencoded` body
    PostForm,
}

/// A single backend request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AjaxRequest {
    pub action: AjaxAction,
    pub method: HttpMethod,
    pub params: Vec<(String, String)>,
}

impl AjaxRequest {
    pub fn get(action: AjaxAction) -> Self {
        Self {
            action,
            method: HttpMethod::Get,
            params: Vec::new(),
        }
    }

    pub fn post_form(action: AjaxAction) -> Self {
        Self {
            action,
            method: HttpMethod::PostForm,
            params: Vec::new(),
        }
    }

    /// Append a parameter
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Look up a parameter by name
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Full parameter list as sent on the wire, `action` and `nonce` first
    pub fn encoded_params<'a>(&'a self, nonce: &'a str) -> Vec<(&'a str, &'a str)> {
        let mut params = Vec::with_capacity(self.params.len() + 2);
        params.push(("action", self.action.as_ref()));
        params.push(("nonce", nonce));
        params.extend(self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        params
    }
}

/// Backend transport
///
/// Implementations perform the actual I/O and return the raw response body.
/// Decoding the body is left to callers so that parsing stays a separate,
/// observable step.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
#[async_trait]
pub trait AjaxTransport: Send + Sync {
    /// Send a request and return the response body
    async fn send(&self, request: &AjaxRequest) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_action_wire_names() {
        assert_eq!(AjaxAction::BlockInitData.as_ref(), "podloom_get_block_init_data");
        assert_eq!(AjaxAction::TransistorEpisodes.as_ref(), "podloom_get_episodes");
        assert_eq!(AjaxAction::RssEpisodes.as_ref(), "podloom_get_rss_episodes");
        assert_eq!(AjaxAction::RenderRssEpisode.to_string(), "podloom_render_rss_episode");
        assert_eq!(
            AjaxAction::from_str("podloom_get_subscribe_preview").unwrap(),
            AjaxAction::SubscribePreview
        );
    }

    #[test]
    fn test_encoded_params_order() {
        let request = AjaxRequest::get(AjaxAction::TransistorEpisodes)
            .param("show_id", "42")
            .param("page", 2);

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.encoded_params("secret"),
            vec![
                ("action", "podloom_get_episodes"),
                ("nonce", "secret"),
                ("show_id", "42"),
                ("page", "2"),
            ]
        );
    }

    #[test]
    fn test_param_value() {
        let request = AjaxRequest::post_form(AjaxAction::RssEpisodes).param("feed_id", "abc");
        assert_eq!(request.method, HttpMethod::PostForm);
        assert_eq!(request.param_value("feed_id"), Some("abc"));
        assert_eq!(request.param_value("page"), None);
    }
}
