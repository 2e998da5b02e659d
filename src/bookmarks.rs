use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use crate::models::Article;

const STORE_FILE: &str = "saved_articles.json";

/// Persistent store of bookmarked articles.
/// Holds one JSON array of articles, insertion-ordered, deduplicated on URL
/// at insertion time. Append-only: no removal, no update-in-place.
///
/// Reads and writes are a plain read-modify-write with no locking; that is
/// safe in this single-threaded UI, but concurrent writers would need a
/// serialization point.
pub struct BookmarkStore {
    store_path: PathBuf,
}

impl BookmarkStore {
    /// Opens the store in the default data directory:
    /// `NEWSGRID_DATA_DIR` if set, else `$XDG_DATA_HOME/newsgrid`, else
    /// `~/.local/share/newsgrid`.
    pub fn new() -> Result<Self> {
        let base_dir = if let Ok(dir) = std::env::var("NEWSGRID_DATA_DIR") {
            PathBuf::from(dir)
        } else if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
            PathBuf::from(xdg_data).join("newsgrid")
        } else {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".local/share/newsgrid")
        };

        Self::at(base_dir)
    }

    /// Opens the store rooted at an explicit directory.
    pub fn at(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("Failed to create data dir {}", base_dir.display()))?;

        Ok(Self {
            store_path: base_dir.join(STORE_FILE),
        })
    }

    /// Returns the saved articles in insertion order.
    /// A missing file or malformed content counts as "no bookmarks", never
    /// as an error: bookmarks are a convenience, not critical state.
    pub fn load(&self) -> Result<Vec<Article>> {
        if !self.store_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.store_path)
            .with_context(|| format!("Failed to read {}", self.store_path.display()))?;

        match serde_json::from_str(&content) {
            Ok(articles) => Ok(articles),
            Err(e) => {
                warn!(error = %e, "ignoring malformed bookmark file");
                Ok(Vec::new())
            }
        }
    }

    /// Appends an article unless one with the same URL is already stored.
    /// Returns `true` if the article was appended, `false` on the no-op.
    /// Idempotent: saving the same article twice never duplicates it.
    pub fn save(&self, article: &Article) -> Result<bool> {
        let mut articles = self.load()?;

        if articles.iter().any(|saved| saved.url == article.url) {
            return Ok(false);
        }

        articles.push(article.clone());
        fs::write(&self.store_path, serde_json::to_string_pretty(&articles)?)
            .with_context(|| format!("Failed to write {}", self.store_path.display()))?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, RawArticle};
    use tempfile::TempDir;

    fn test_article(url: &str, title: &str) -> Article {
        Article {
            source_name: "Test Source".to_string(),
            author: "Test Author".to_string(),
            title: title.to_string(),
            description: format!("{} description", title),
            url: url.to_string(),
            image_url: String::new(),
            published_at: "2024-09-21T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn load_on_empty_store_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = BookmarkStore::at(temp_dir.path()).unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn load_on_corrupt_store_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = BookmarkStore::at(temp_dir.path()).unwrap();

        std::fs::write(temp_dir.path().join(STORE_FILE), "{not json").unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_appends_and_loads_back() {
        let temp_dir = TempDir::new().unwrap();
        let store = BookmarkStore::at(temp_dir.path()).unwrap();

        let article = test_article("https://example.com/1", "First");
        assert!(store.save(&article).unwrap());

        let saved = store.load().unwrap();
        assert_eq!(saved, vec![article]);
    }

    #[test]
    fn save_is_idempotent_on_url() {
        let temp_dir = TempDir::new().unwrap();
        let store = BookmarkStore::at(temp_dir.path()).unwrap();

        let article = test_article("https://example.com/1", "First");
        assert!(store.save(&article).unwrap());
        assert!(!store.save(&article).unwrap());

        // A different title with the same URL is still the same article.
        let retitled = test_article("https://example.com/1", "First, revised");
        assert!(!store.save(&retitled).unwrap());

        let saved = store.load().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].title, "First");
    }

    #[test]
    fn save_preserves_insertion_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = BookmarkStore::at(temp_dir.path()).unwrap();

        for i in 1..=4 {
            let article = test_article(&format!("https://example.com/{}", i), &format!("Article {}", i));
            store.save(&article).unwrap();
        }

        let titles: Vec<String> = store
            .load()
            .unwrap()
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, ["Article 1", "Article 2", "Article 3", "Article 4"]);
    }

    #[test]
    fn defaulted_article_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let store = BookmarkStore::at(temp_dir.path()).unwrap();

        let article = Article::from_raw(RawArticle::default());
        store.save(&article).unwrap();

        assert_eq!(store.load().unwrap(), vec![article]);
    }
}
