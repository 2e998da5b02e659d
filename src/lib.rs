pub mod bookmarks;
pub mod fetcher;
pub mod layout;
pub mod models;
pub mod news;
pub mod repository;
pub mod viewer;
