use std::sync::Arc;

use nsum_core::{Error, LanguageCode, Result, UnsupportedReason};
use thiserror::Error as ThisError;
use tracing::{debug, info, warn};
use whatlang::Lang;

use crate::chunker::{char_len, leading_chars};

#[derive(ThisError, Debug)]
#[error("{0}")]
pub struct ClassifierError(pub String);

/// Statistical language classifier returning ISO 639 codes.
///
/// Implementations must be deterministic: the same sample always yields the
/// same answer.
pub trait LanguageClassifier: Send + Sync {
    fn classify(&self, sample: &str) -> std::result::Result<Option<String>, ClassifierError>;
}

/// Trigram classifier backed by `whatlang`. Has no random state.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangClassifier;

impl LanguageClassifier for WhatlangClassifier {
    fn classify(&self, sample: &str) -> std::result::Result<Option<String>, ClassifierError> {
        Ok(whatlang::detect(sample).map(|info| {
            match info.lang() {
                Lang::Eng => "en",
                Lang::Ara => "ar",
                Lang::Fra => "fr",
                other => other.code(),
            }
            .to_string()
        }))
    }
}

/// Outcome of language identification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    Supported(LanguageCode),
    Unsupported(UnsupportedReason),
}

impl Detection {
    pub fn language(&self) -> Option<LanguageCode> {
        match self {
            Detection::Supported(lang) => Some(*lang),
            Detection::Unsupported(_) => None,
        }
    }

    pub fn into_result(self) -> Result<LanguageCode> {
        match self {
            Detection::Supported(lang) => Ok(lang),
            Detection::Unsupported(reason) => Err(Error::LanguageDetection(reason)),
        }
    }
}

#[derive(Clone)]
pub struct LanguageIdentifier {
    classifier: Arc<dyn LanguageClassifier>,
    min_chars: usize,
    sample_chars: usize,
}

impl LanguageIdentifier {
    pub fn new(classifier: Arc<dyn LanguageClassifier>, min_chars: usize, sample_chars: usize) -> Self {
        Self {
            classifier,
            min_chars,
            sample_chars,
        }
    }

    pub fn identify(&self, text: &str) -> Detection {
        let chars = char_len(text);
        if chars < self.min_chars {
            warn!("Text too short for language detection ({} chars)", chars);
            return Detection::Unsupported(UnsupportedReason::TooShort {
                chars,
                minimum: self.min_chars,
            });
        }

        let sample = leading_chars(text, self.sample_chars);
        match self.classifier.classify(sample) {
            Ok(Some(code)) => match code.parse::<LanguageCode>() {
                Ok(lang) => {
                    info!("🌐 Detected language: {} ({})", lang.name(), lang.code());
                    Detection::Supported(lang)
                }
                Err(_) => {
                    info!("Detected unsupported language: {}", code);
                    Detection::Unsupported(UnsupportedReason::Language(code))
                }
            },
            Ok(None) => {
                debug!("Classifier returned no language for {} chars", char_len(sample));
                Detection::Unsupported(UnsupportedReason::Unrecognized)
            }
            Err(e) => {
                warn!("Language detection error: {}", e);
                Detection::Unsupported(UnsupportedReason::Classifier(e.0))
            }
        }
    }
}

impl Default for LanguageIdentifier {
    fn default() -> Self {
        Self::new(Arc::new(WhatlangClassifier), 10, 500)
    }
}

impl std::fmt::Debug for LanguageIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageIdentifier")
            .field("classifier", &"<dyn LanguageClassifier>")
            .field("min_chars", &self.min_chars)
            .field("sample_chars", &self.sample_chars)
            .finish()
    }
}
