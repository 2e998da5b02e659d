use anyhow::Result;
use clap::{Parser, Subcommand};

use newsgrid::fetcher::NewsQuery;
use newsgrid::{bookmarks, news, viewer};

#[derive(Parser)]
#[command(name = "newsgrid")]
#[command(about = "Browse and bookmark news in a zigzag grid", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the latest articles and open the browser UI
    Browse {
        /// Search keyword sent to the news API
        #[arg(short, long)]
        query: Option<String>,
        /// Earliest publication date (YYYY-MM-DD)
        #[arg(short, long)]
        from: Option<String>,
    },
    /// Print the saved articles without fetching
    Saved,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Browse { query, from } => {
            let mut news_query = NewsQuery::default();
            if let Some(keyword) = query {
                news_query.keyword = keyword;
            }
            news_query.from = from;

            println!("Loading news...");
            let articles = match news::get_news(&news_query).await {
                Ok(articles) => articles,
                Err(e) => {
                    // The presentation layer is the only error boundary;
                    // fetch errors arrive here unchanged.
                    eprintln!("Error loading news: {}", e);
                    std::process::exit(1);
                }
            };

            viewer::run_viewer(articles)?;
        }
        Commands::Saved => {
            let store = bookmarks::BookmarkStore::new()?;
            let saved = store.load()?;

            if saved.is_empty() {
                println!("No saved articles.");
            } else {
                for article in saved {
                    println!("{}", article.title);
                    println!("  {}", article.url);
                    if !article.published_at.is_empty() {
                        println!("  {}", article.published_display());
                    }
                }
            }
        }
    }

    Ok(())
}
