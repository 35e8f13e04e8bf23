use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const TIME_NOT_AVAILABLE: &str = "Time not available";
pub const UNKNOWN_SOURCE: &str = "Unknown";

const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const PUBLISHED_DISPLAY_FORMAT: &str = "Published on: %B %d, %Y at %I:%M %p";

/// A news article as shown to the reader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub description: String,
    /// Human readable publish time, or [`TIME_NOT_AVAILABLE`].
    pub published: String,
    pub source: String,
}

impl Article {
    /// Text used when comparing the article against the submitted news.
    pub fn similarity_text(&self) -> String {
        format!("{}. {}", self.title, self.description)
    }
}

/// Article entry of the news search response.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub source: Option<RawSource>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub name: Option<String>,
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        let published = format_published(raw.published_at.as_deref().unwrap_or_default());
        let source = raw
            .source
            .and_then(|s| s.name)
            .unwrap_or_else(|| UNKNOWN_SOURCE.to_string());
        Self {
            title: raw.title,
            url: raw.url,
            description: raw.description.unwrap_or_default(),
            published,
            source,
        }
    }
}

/// Formats a `YYYY-MM-DDTHH:MM:SSZ` timestamp for display. Anything else
/// yields [`TIME_NOT_AVAILABLE`].
pub fn format_published(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw, PUBLISHED_AT_FORMAT) {
        Ok(ts) => ts.format(PUBLISHED_DISPLAY_FORMAT).to_string(),
        Err(_) => TIME_NOT_AVAILABLE.to_string(),
    }
}
