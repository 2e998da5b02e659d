use anyhow::Result;

use crate::fetcher::NewsQuery;
use crate::models::Article;
use crate::repository;

/// Current news for the presentation layer. Pure delegation to the
/// repository; exists as the seam between presentation and data layers.
pub async fn get_news(query: &NewsQuery) -> Result<Vec<Article>> {
    repository::fetch_news_data(query).await
}
