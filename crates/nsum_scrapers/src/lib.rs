pub mod config;
pub mod manager;
pub mod scrapers;
pub mod utils;

pub use config::ScraperConfig;
pub use manager::ScraperManager;
pub use scrapers::Scraper;

pub mod prelude {
    pub use super::scrapers::Scraper;
    pub use super::{ScraperConfig, ScraperManager};
    pub use nsum_core::{Error, RawArticle, Result};
}
