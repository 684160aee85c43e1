pub mod error;
pub mod models;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use models::{SummarizationModel, SummaryParams, TranslationModel};
pub use storage::ArticleStore;
pub use types::{
    CacheStats, LanguageCode, ProcessedArticle, RawArticle, UnsupportedReason, NOT_AVAILABLE,
    UNKNOWN_SOURCE, UNTITLED,
};
