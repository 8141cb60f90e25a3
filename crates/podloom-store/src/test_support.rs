//! Test doubles and fixtures shared by the store's unit tests

use async_trait::async_trait;
use podloom_client::{
    AjaxRequest, AjaxTransport, Episode, EpisodeAttributes, Error, Result, Source, SubscribeLink,
};
use serde_json::{json, Value};
use std::sync::Mutex;

type Handler = Box<dyn Fn(&AjaxRequest) -> Result<String> + Send + Sync>;

/// Mock transport for testing
///
/// Records every request and answers through `handler`. Each call yields
/// once before answering so concurrent workflows interleave the way they
/// do against a real network.
pub struct MockTransport {
    handler: Handler,
    requests: Mutex<Vec<AjaxRequest>>,
}

impl MockTransport {
    pub fn new(handler: impl Fn(&AjaxRequest) -> Result<String> + Send + Sync + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with the same JSON body
    pub fn json(body: Value) -> Self {
        let body = body.to_string();
        Self::new(move |_| Ok(body.clone()))
    }

    /// Fail every request at the transport level
    pub fn failing() -> Self {
        Self::new(|_| Err(transport_error()))
    }

    pub fn requests(&self) -> Vec<AjaxRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl AjaxTransport for MockTransport {
    async fn send(&self, request: &AjaxRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        tokio::task::yield_now().await;
        (self.handler)(request)
    }
}

pub fn transport_error() -> Error {
    Error::Status {
        status: 502,
        body: "Bad Gateway".to_string(),
    }
}

pub fn episode(id: &str) -> Episode {
    Episode {
        id: id.to_string(),
        kind: Some("episode".to_string()),
        attributes: EpisodeAttributes {
            title: format!("Episode {}", id),
            audio_url: format!("https://cdn.example.com/{}.mp3", id),
            ..EpisodeAttributes::default()
        },
    }
}

pub fn episode_ids(items: &[Episode]) -> Vec<&str> {
    items.iter().map(|e| e.id.as_str()).collect()
}

pub fn source(id: &str, name: &str) -> Source {
    Source::from_raw(json!({"id": id, "name": name})).unwrap()
}

pub fn link(platform: &str) -> SubscribeLink {
    SubscribeLink {
        platform: platform.to_string(),
        url: format!("https://{}.example.com/podcast", platform),
        svg: "<svg/>".to_string(),
        name: platform.to_string(),
    }
}

/// Transistor episode list body in a success envelope
pub fn transistor_page(ids: &[&str], current: u32, total: u32) -> Value {
    let data: Vec<Value> = ids
        .iter()
        .map(|id| json!({"id": id, "type": "episode", "attributes": {"title": format!("Episode {}", id)}}))
        .collect();
    json!({
        "success": true,
        "data": {"data": data, "meta": {"currentPage": current, "totalPages": total}}
    })
}

/// RSS episode list body in a success envelope
pub fn rss_page(ids: &[&str], page: u32, pages: u32) -> Value {
    let episodes: Vec<Value> = ids
        .iter()
        .map(|id| json!({"id": id, "title": format!("Episode {}", id), "audio_url": format!("{}.mp3", id)}))
        .collect();
    json!({"success": true, "data": {"episodes": episodes, "page": page, "pages": pages}})
}
