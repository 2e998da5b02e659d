use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Image path shown when an article carries no image URL of its own.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.jpg";

/// Raw response body of the NewsAPI `everything` endpoint.
/// Every field is optional on the wire; defaulting happens in `Article::from_raw`.
#[derive(Debug, Deserialize)]
pub struct NewsApiResponse {
    #[serde(default)]
    pub articles: Vec<RawArticle>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawArticle {
    pub source: Option<RawSource>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSource {
    pub name: Option<String>,
}

/// One normalized news article. Constructed once per raw API item and never
/// mutated afterwards. Two articles are the same article iff their `url`
/// strings are equal (exact match).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub source_name: String,
    pub author: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
    pub published_at: String,
}

impl Article {
    /// Normalizes a raw API item. Missing source name or author become
    /// "Unknown"; every other missing field becomes the empty string.
    pub fn from_raw(raw: RawArticle) -> Self {
        Self {
            source_name: raw
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            author: raw.author.unwrap_or_else(|| "Unknown".to_string()),
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            image_url: raw.url_to_image.unwrap_or_default(),
            published_at: raw.published_at.unwrap_or_default(),
        }
    }

    /// Publication timestamp formatted for display.
    /// Falls back to the raw text when it does not parse as RFC 3339.
    pub fn published_display(&self) -> String {
        DateTime::parse_from_rfc3339(&self.published_at)
            .map(|d| d.with_timezone(&Utc).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| self.published_at.clone())
    }

    pub fn image_url_or_placeholder(&self) -> &str {
        if self.image_url.is_empty() {
            PLACEHOLDER_IMAGE
        } else {
            &self.image_url
        }
    }
}
