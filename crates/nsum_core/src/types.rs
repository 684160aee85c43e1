use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Placeholder for fields the source could not provide.
pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN_SOURCE: &str = "Unknown";
pub const UNTITLED: &str = "Untitled";

/// An article as handed over by a scraper, before any processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawArticle {
    pub url: String,
    pub source: String,
    pub title: String,
    pub text: String,
    pub date: Option<String>,
}

/// The languages the pipeline can take as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "fr")]
    French,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 3] = [LanguageCode::English, LanguageCode::Arabic, LanguageCode::French];

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::Arabic => "ar",
            LanguageCode::French => "fr",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LanguageCode::English => "English",
            LanguageCode::Arabic => "Arabic",
            LanguageCode::French => "French",
        }
    }

    pub fn is_english(&self) -> bool {
        matches!(self, LanguageCode::English)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LanguageCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(LanguageCode::English),
            "ar" => Ok(LanguageCode::Arabic),
            "fr" => Ok(LanguageCode::French),
            other => Err(Error::LanguageDetection(UnsupportedReason::Language(other.to_string()))),
        }
    }
}

/// Why a text could not be assigned a supported language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedReason {
    TooShort { chars: usize, minimum: usize },
    Unrecognized,
    Language(String),
    Classifier(String),
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedReason::TooShort { chars, minimum } => {
                write!(f, "text too short ({} chars, need {})", chars, minimum)
            }
            UnsupportedReason::Unrecognized => f.write_str("no language recognized"),
            UnsupportedReason::Language(code) => write!(f, "unsupported language '{}'", code),
            UnsupportedReason::Classifier(msg) => write!(f, "classifier error: {}", msg),
        }
    }
}

/// Result of running an article through the pipeline. Keyed by `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedArticle {
    pub url: String,
    pub source: String,
    pub title: String,
    pub language: LanguageCode,
    pub original_text: String,
    pub english_text: String,
    pub summary: String,
    pub published: String,
    #[serde(with = "duration_secs")]
    pub processing_time: Duration,
    pub processed_at: DateTime<Utc>,
}

impl ProcessedArticle {
    /// Compares everything except timing metadata.
    pub fn same_content(&self, other: &ProcessedArticle) -> bool {
        self.url == other.url
            && self.source == other.source
            && self.title == other.title
            && self.language == other.language
            && self.original_text == other.original_text
            && self.english_text == other.english_text
            && self.summary == other.summary
            && self.published == other.published
    }

    pub fn was_translated(&self) -> bool {
        !self.language.is_english()
    }
}

/// Aggregate counts over the cached articles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub total: u64,
    pub by_language: BTreeMap<String, u64>,
    pub by_source: BTreeMap<String, u64>,
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() || secs < 0.0 {
            return Err(serde::de::Error::custom("processing time must be a non-negative number"));
        }
        Ok(Duration::from_secs_f64(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code_parsing() {
        assert_eq!("en".parse::<LanguageCode>().unwrap(), LanguageCode::English);
        assert_eq!(" AR ".parse::<LanguageCode>().unwrap(), LanguageCode::Arabic);
        assert_eq!("fr".parse::<LanguageCode>().unwrap(), LanguageCode::French);
        assert!(matches!(
            "de".parse::<LanguageCode>(),
            Err(Error::LanguageDetection(UnsupportedReason::Language(code))) if code == "de"
        ));
    }

    #[test]
    fn test_processed_article_serializes_codes_and_seconds() {
        let article = ProcessedArticle {
            url: "https://example.com/a".to_string(),
            source: "Example".to_string(),
            title: "Title".to_string(),
            language: LanguageCode::French,
            original_text: "Bonjour".to_string(),
            english_text: "Hello".to_string(),
            summary: "Hello".to_string(),
            published: NOT_AVAILABLE.to_string(),
            processing_time: Duration::from_millis(1500),
            processed_at: Utc::now(),
        };

        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["language"], "fr");
        assert_eq!(json["processing_time"], 1.5);

        let back: ProcessedArticle = serde_json::from_value(json).unwrap();
        assert!(back.same_content(&article));
        assert!(back.was_translated());
    }
}
