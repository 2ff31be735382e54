pub mod browser;
pub mod config;
pub mod models;
pub mod scraper;
pub mod storage;
