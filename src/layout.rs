use crate::models::Article;

/// Articles per render block: one featured item plus the secondary grid.
pub const BLOCK_SIZE: usize = 5;
/// Maximum size of a block's secondary grid.
pub const GRID_SIZE: usize = BLOCK_SIZE - 1;

/// Side the featured panel sits on within a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Left,
    Right,
}

/// One render block: a featured article and up to `GRID_SIZE` secondary
/// articles, borrowed from the filtered sequence.
#[derive(Debug, PartialEq)]
pub struct RenderBlock<'a> {
    pub start_index: usize,
    pub featured: &'a Article,
    pub secondary: &'a [Article],
}

impl<'a> RenderBlock<'a> {
    /// Blocks alternate sides: block `k = start_index / BLOCK_SIZE` is
    /// left-anchored when `k` is even, right-anchored when odd.
    pub fn orientation(&self) -> Orientation {
        if (self.start_index / BLOCK_SIZE) % 2 == 0 {
            Orientation::Left
        } else {
            Orientation::Right
        }
    }

    /// Secondary cell `i` swaps its internal ordering on odd positions,
    /// producing the zigzag within the grid.
    pub fn cell_swapped(&self, i: usize) -> bool {
        i % 2 == 1
    }
}

/// Builds the block starting at `start_index`, which must be a multiple of
/// `BLOCK_SIZE`. Returns `None` when the index is out of bounds; a partial
/// tail yields a block with fewer than `GRID_SIZE` secondary items.
pub fn block_at(articles: &[Article], start_index: usize) -> Option<RenderBlock<'_>> {
    debug_assert_eq!(start_index % BLOCK_SIZE, 0);

    let featured = articles.get(start_index)?;
    let grid_end = (start_index + BLOCK_SIZE).min(articles.len());

    Some(RenderBlock {
        start_index,
        featured,
        secondary: &articles[start_index + 1..grid_end],
    })
}

/// Partitions the full sequence into consecutive blocks: one per index that
/// is a multiple of `BLOCK_SIZE`, so N articles yield ceil(N / 5) blocks,
/// the last possibly partial. Empty input yields no blocks; the caller is
/// responsible for the "no articles" placeholder.
pub fn segment(articles: &[Article]) -> Vec<RenderBlock<'_>> {
    (0..articles.len())
        .step_by(BLOCK_SIZE)
        .filter_map(|start| block_at(articles, start))
        .collect()
}

/// Case-insensitive substring filter over title and description.
/// An empty term matches everything; input order is preserved.
pub fn filter_articles(articles: &[Article], term: &str) -> Vec<Article> {
    let term = term.to_lowercase();
    articles
        .iter()
        .filter(|article| {
            article.title.to_lowercase().contains(&term)
                || article.description.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}
