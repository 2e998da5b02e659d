use tempfile::TempDir;

use newsgrid::bookmarks::BookmarkStore;
use newsgrid::layout;
use newsgrid::models::{Article, RawArticle, RawSource};

fn raw(title: &str, url: &str) -> RawArticle {
    RawArticle {
        source: Some(RawSource {
            name: Some("Wire Service".to_string()),
        }),
        author: None,
        title: Some(title.to_string()),
        description: Some(format!("{} in depth", title)),
        url: Some(url.to_string()),
        url_to_image: None,
        published_at: Some("2024-09-21T12:00:00Z".to_string()),
    }
}

#[test]
fn filter_segment_and_bookmark_round_trip() {
    // Twelve articles, as a fresh fetch would map them.
    let articles: Vec<Article> = (0..12)
        .map(|i| {
            let title = if i % 2 == 0 {
                format!("Bitcoin update {}", i)
            } else {
                format!("Ethereum update {}", i)
            };
            Article::from_raw(raw(&title, &format!("https://news.example/{}", i)))
        })
        .collect();

    // Author was absent on the wire.
    assert!(articles.iter().all(|a| a.author == "Unknown"));

    // Unfiltered, the page shows three blocks.
    assert_eq!(layout::segment(&articles).len(), 3);

    // Filtering narrows to the six bitcoin articles, which fill two blocks.
    let filtered = layout::filter_articles(&articles, "bitcoin");
    assert_eq!(filtered.len(), 6);
    let blocks = layout::segment(&filtered);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[1].secondary.len(), 0);

    // Bookmarking the featured article of each block persists both, once.
    let temp_dir = TempDir::new().unwrap();
    let store = BookmarkStore::at(temp_dir.path()).unwrap();

    assert!(store.save(blocks[0].featured).unwrap());
    assert!(store.save(blocks[1].featured).unwrap());
    assert!(!store.save(blocks[0].featured).unwrap());

    // A second session sees the same list in insertion order.
    let reopened = BookmarkStore::at(temp_dir.path()).unwrap();
    let saved = reopened.load().unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].url, "https://news.example/0");
    assert_eq!(saved[1].url, "https://news.example/10");
}
