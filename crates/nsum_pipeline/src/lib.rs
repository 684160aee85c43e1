pub mod context;
pub mod gateway;
pub mod orchestrator;

pub use context::{NewsSummarizer, Settings, DEFAULT_SUMMARY_WORDS, MAX_SUMMARY_WORDS, MIN_SUMMARY_WORDS};
pub use gateway::{CacheGateway, CacheStatus, GatewayResponse};
pub use orchestrator::Orchestrator;

pub mod prelude {
    pub use super::{CacheGateway, CacheStatus, GatewayResponse, NewsSummarizer, Orchestrator, Settings};
    pub use nsum_core::{Error, ProcessedArticle, RawArticle, Result};
}
