use anyhow::Result;

use crate::fetcher::{self, NewsQuery};
use crate::models::Article;

/// Fetches once and maps each raw item into an `Article`, preserving the
/// order the remote service returned (already sorted by recency).
/// Fetch errors propagate unchanged.
pub async fn fetch_news_data(query: &NewsQuery) -> Result<Vec<Article>> {
    let response = fetcher::fetch_news(query).await?;
    Ok(response
        .articles
        .into_iter()
        .map(Article::from_raw)
        .collect())
}
