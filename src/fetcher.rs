use anyhow::{anyhow, Context, Result};
use tracing::info;

use crate::models::NewsApiResponse;

const API_URL: &str = "https://newsapi.org/v2/everything";
const API_KEY_VAR: &str = "NEWS_API_KEY";

/// Parameters for one search against the news API.
#[derive(Debug, Clone)]
pub struct NewsQuery {
    pub keyword: String,
    pub from: Option<String>,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            keyword: "bitcoin".to_string(),
            from: None,
        }
    }
}

/// Issues one GET against the NewsAPI `everything` endpoint and decodes the
/// raw response body. No retry, no pagination; any transport failure or
/// non-success status is returned as an error.
pub async fn fetch_news(query: &NewsQuery) -> Result<NewsApiResponse> {
    let api_key = std::env::var(API_KEY_VAR)
        .with_context(|| format!("{} is not set", API_KEY_VAR))?;

    let client = reqwest::Client::builder()
        .user_agent("NewsGrid/0.1")
        .build()?;

    let mut params = vec![
        ("q", query.keyword.clone()),
        ("sortBy", "publishedAt".to_string()),
        ("apiKey", api_key),
    ];
    if let Some(from) = &query.from {
        params.push(("from", from.clone()));
    }

    info!(keyword = %query.keyword, "fetching news");

    let response = client.get(API_URL).query(&params).send().await?;

    if !response.status().is_success() {
        return Err(anyhow!("Failed to fetch news: {}", response.status()));
    }

    let body = response.json::<NewsApiResponse>().await?;
    info!(count = body.articles.len(), "fetched articles");

    Ok(body)
}
