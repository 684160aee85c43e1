pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::MemoryStorage;

#[cfg(feature = "sqlite")]
pub use sqlite::SQLiteStorage;

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use chrono::{DateTime, TimeZone, Utc};
    use nsum_core::{LanguageCode, ProcessedArticle};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
    }

    /// Builds a storable article; larger offsets are more recent.
    pub fn article(url: &str, source: &str, language: LanguageCode, offset_secs: i64) -> ProcessedArticle {
        let original_text = match language {
            LanguageCode::English => "The parliament met on Tuesday to vote on the budget.",
            LanguageCode::Arabic => "اجتمع البرلمان يوم الثلاثاء للتصويت على الميزانية.",
            LanguageCode::French => "Le parlement s'est réuni mardi pour voter le budget.",
        };
        ProcessedArticle {
            url: url.to_string(),
            source: source.to_string(),
            title: format!("{} headline", source),
            language,
            original_text: original_text.to_string(),
            english_text: "The parliament met on Tuesday to vote on the budget.".to_string(),
            summary: "Parliament voted on the budget.".to_string(),
            published: "2024-05-01".to_string(),
            processing_time: Duration::from_millis(1234),
            processed_at: base_time() + chrono::Duration::seconds(offset_secs),
        }
    }
}
