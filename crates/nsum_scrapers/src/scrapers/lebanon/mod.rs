pub mod beirut_today;
pub mod mtv;
pub mod naharnet;

pub use beirut_today::BeirutTodayScraper;
pub use mtv::MtvLebanonScraper;
pub use naharnet::NaharnetScraper;

use super::Scraper;

/// Returns all supported Lebanese news sources, in dispatch order
pub fn get_scrapers() -> Vec<Box<dyn Scraper>> {
    vec![
        Box::new(NaharnetScraper::new()),
        Box::new(MtvLebanonScraper::new()),
        Box::new(BeirutTodayScraper::new()),
    ]
}
