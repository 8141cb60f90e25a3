//! Backend data transfer objects
//!
//! Both source kinds end up as [`Episode`]: Transistor episodes arrive in
//! that shape already, RSS episodes are flat and get wrapped by
//! [`From<RssEpisode>`].

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type tag given to normalized RSS episodes
pub const RSS_EPISODE_TYPE: &str = "rss_episode";

/// Ids arrive as strings from RSS and as numbers from some Transistor payloads
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// PHP encodes missing values as `null`; treat them like absent fields
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An episode in the normalized shape shared by both source kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// `episode` for Transistor, `rss_episode` for normalized RSS items
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default)]
    pub attributes: EpisodeAttributes,
}

/// Episode fields used by the players
///
/// Fields not listed here are kept in `extra` so nothing the backend sends
/// is lost on the way to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeAttributes {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub audio_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Seconds from Transistor, `HH:MM:SS` strings from most feeds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,

    /// Podcasting 2.0 payload (chapters, transcripts, people, funding), opaque here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub podcast20: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A flat episode as returned by the RSS episodes endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RssEpisode {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub audio_url: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub duration: Option<Value>,
    #[serde(default)]
    pub podcast20: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<RssEpisode> for Episode {
    fn from(rss: RssEpisode) -> Self {
        Episode {
            id: rss.id,
            kind: Some(RSS_EPISODE_TYPE.to_string()),
            attributes: EpisodeAttributes {
                title: rss.title,
                audio_url: rss.audio_url,
                image: rss.image,
                description: rss.description,
                date: rss.date,
                duration: rss.duration,
                podcast20: rss.podcast20,
                extra: rss.extra,
            },
        }
    }
}

/// Pagination block of a Transistor episode list
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageMeta {
    #[serde(default, rename = "currentPage", alias = "current_page")]
    pub current_page: Option<u32>,
    #[serde(default, rename = "totalPages", alias = "total_pages")]
    pub total_pages: Option<u32>,
}

/// `{data: [...], meta: {currentPage, totalPages}}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransistorEpisodeList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Episode>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: PageMeta,
}

/// `{episodes: [...], page, pages}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RssEpisodeList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub episodes: Vec<RssEpisode>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub pages: Option<u32>,
}

/// A podcast origin: Transistor show or RSS feed
///
/// Built from the raw object so the different backend shapes
/// (`{id, name}`, `{id, title}`, `{id, attributes: {title, slug}}`) all map
/// to one record. The raw object is kept for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Source {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub raw: Value,
}

impl Source {
    pub fn from_raw(raw: Value) -> Result<Self, String> {
        let id = match raw.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(format!("source without id: {}", raw)),
        };

        let attributes = raw.get("attributes");
        let text = |key: &str| {
            raw.get(key)
                .or_else(|| attributes.and_then(|a| a.get(key)))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        let name = text("name").or_else(|| text("title")).unwrap_or_default();
        let slug = text("slug");

        Ok(Source {
            id,
            name,
            slug,
            raw,
        })
    }
}

impl<'de> Deserialize<'de> for Source {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Source::from_raw(raw).map_err(de::Error::custom)
    }
}

/// Typography settings, passed through to the renderer untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Typography(pub Map<String, Value>);

impl Typography {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// Payload of `podloom_get_block_init_data`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BlockInitData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub transistor_shows: Vec<Source>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rss_feeds: Vec<Source>,
    /// Absent or `null` when the site has no typography settings
    #[serde(default)]
    pub typography: Option<Typography>,
}

/// A podcast offering subscribe buttons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscribePodcast {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, alias = "title", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One subscribe button
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeLink {
    #[serde(default, deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub svg: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Payload of `podloom_get_subscribe_preview`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SubscribePreview {
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<SubscribeLink>,
}

/// Payload of `podloom_render_rss_episode`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RenderedHtml {
    #[serde(default, deserialize_with = "null_as_default")]
    pub html: String,
}

/// Icon color variant of the subscribe buttons
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Brand,
    Black,
    White,
    Gray,
    Custom,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_rss_episode_normalization() {
        let rss: RssEpisode = serde_json::from_value(json!({
            "id": "a",
            "title": "T",
            "audio_url": "u",
            "image": null,
            "description": "d",
            "date": "2024-01-01",
            "duration": "01:02:03",
            "podcast20": {"chapters": {"url": "https://example.com/ch.json"}},
            "guid": "urn:x"
        }))
        .unwrap();

        let episode = Episode::from(rss);
        assert_eq!(episode.id, "a");
        assert_eq!(episode.kind.as_deref(), Some(RSS_EPISODE_TYPE));
        assert_eq!(episode.attributes.title, "T");
        assert_eq!(episode.attributes.audio_url, "u");
        assert_eq!(episode.attributes.image, None);
        assert_eq!(episode.attributes.duration, Some(json!("01:02:03")));
        assert!(episode.attributes.podcast20.is_some());
        assert_eq!(episode.attributes.extra.get("guid"), Some(&json!("urn:x")));

        let value = serde_json::to_value(&episode).unwrap();
        assert_eq!(value["type"], "rss_episode");
        assert_eq!(value["attributes"]["title"], "T");
        assert_eq!(value["attributes"]["guid"], "urn:x");
    }

    #[test]
    fn test_transistor_list_with_numeric_ids() {
        let list: TransistorEpisodeList = serde_json::from_value(json!({
            "data": [
                {"id": 101, "type": "episode", "attributes": {"title": "One", "media_url": "m"}},
                {"id": "102", "type": "episode", "attributes": {"title": null}}
            ],
            "meta": {"currentPage": 1, "totalPages": 3}
        }))
        .unwrap();

        assert_eq!(list.data.len(), 2);
        assert_eq!(list.data[0].id, "101");
        assert_eq!(list.data[0].attributes.extra.get("media_url"), Some(&json!("m")));
        assert_eq!(list.data[1].attributes.title, "");
        assert_eq!(list.meta.current_page, Some(1));
        assert_eq!(list.meta.total_pages, Some(3));
    }

    #[test]
    fn test_page_meta_snake_case_alias() {
        let meta: PageMeta =
            serde_json::from_value(json!({"current_page": 2, "total_pages": 4})).unwrap();
        assert_eq!(meta.current_page, Some(2));
        assert_eq!(meta.total_pages, Some(4));
    }

    #[test]
    fn test_source_shapes() {
        let flat: Source = serde_json::from_value(json!({"id": "feed-1", "name": "My Feed"})).unwrap();
        assert_eq!(flat.id, "feed-1");
        assert_eq!(flat.name, "My Feed");
        assert_eq!(flat.slug, None);

        let show: Source = serde_json::from_value(json!({
            "id": 7,
            "attributes": {"title": "Show", "slug": "show"}
        }))
        .unwrap();
        assert_eq!(show.id, "7");
        assert_eq!(show.name, "Show");
        assert_eq!(show.slug.as_deref(), Some("show"));
        assert_eq!(show.raw["attributes"]["slug"], "show");

        assert!(serde_json::from_value::<Source>(json!({"name": "no id"})).is_err());
    }

    #[test]
    fn test_block_init_data_null_typography() {
        let init: BlockInitData = serde_json::from_value(json!({
            "transistor_shows": null,
            "rss_feeds": [{"id": "f", "name": "Feed"}],
            "typography": null
        }))
        .unwrap();
        assert!(init.transistor_shows.is_empty());
        assert_eq!(init.rss_feeds.len(), 1);
        assert_eq!(init.typography, None);
    }

    #[test]
    fn test_color_mode_strings() {
        assert_eq!(ColorMode::Custom.as_ref(), "custom");
        assert_eq!(ColorMode::from_str("gray").unwrap(), ColorMode::Gray);
        assert_eq!(
            serde_json::from_value::<ColorMode>(json!("white")).unwrap(),
            ColorMode::White
        );
        assert_eq!(ColorMode::default(), ColorMode::Brand);
    }
}
