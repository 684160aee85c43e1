use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use nsum_core::{Error, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Which service hosts the translation and summarization models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelBackend {
    #[default]
    HuggingFace,
    Ollama,
    Dummy,
}

impl ModelBackend {
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            ModelBackend::HuggingFace => "https://api-inference.huggingface.co/models",
            ModelBackend::Ollama => "http://localhost:11434",
            ModelBackend::Dummy => "dummy://local",
        }
    }
}

impl fmt::Display for ModelBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelBackend::HuggingFace => "huggingface",
            ModelBackend::Ollama => "ollama",
            ModelBackend::Dummy => "dummy",
        };
        f.write_str(name)
    }
}

impl FromStr for ModelBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "huggingface" | "hf" => Ok(ModelBackend::HuggingFace),
            "ollama" => Ok(ModelBackend::Ollama),
            "dummy" => Ok(ModelBackend::Dummy),
            other => Err(Error::Config(format!(
                "unknown model backend '{}'. Available backends: huggingface, ollama, dummy",
                other
            ))),
        }
    }
}

/// Model identifiers for each task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelNames {
    pub arabic_to_english: String,
    pub french_to_english: String,
    pub summarizer: String,
}

impl ModelNames {
    pub fn for_backend(backend: ModelBackend) -> Self {
        match backend {
            ModelBackend::HuggingFace => Self {
                arabic_to_english: "Helsinki-NLP/opus-mt-ar-en".to_string(),
                french_to_english: "Helsinki-NLP/opus-mt-fr-en".to_string(),
                summarizer: "facebook/bart-large-cnn".to_string(),
            },
            ModelBackend::Ollama => Self {
                arabic_to_english: "gemma3:12b".to_string(),
                french_to_english: "gemma3:12b".to_string(),
                summarizer: "gemma3:12b".to_string(),
            },
            ModelBackend::Dummy => Self {
                arabic_to_english: "dummy-ar-en".to_string(),
                french_to_english: "dummy-fr-en".to_string(),
                summarizer: "dummy-summarizer".to_string(),
            },
        }
    }
}

impl Default for ModelNames {
    fn default() -> Self {
        Self::for_backend(ModelBackend::default())
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    pub backend: ModelBackend,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub models: ModelNames,
    pub request_timeout_secs: u64,
    /// Send a probe request when a model handle is first constructed.
    pub warm_up: bool,
}

impl InferenceConfig {
    pub fn new(backend: ModelBackend) -> Self {
        Self {
            backend,
            models: ModelNames::for_backend(backend),
            ..Self::default()
        }
    }

    pub fn endpoint(&self) -> Result<Url> {
        let raw = self
            .endpoint
            .as_deref()
            .unwrap_or_else(|| self.backend.default_endpoint());
        Url::parse(raw).map_err(|e| Error::Config(format!("invalid model endpoint '{}': {}", raw, e)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            backend: ModelBackend::default(),
            endpoint: None,
            api_key: None,
            models: ModelNames::default(),
            request_timeout_secs: 300,
            warm_up: false,
        }
    }
}

impl fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("backend", &self.backend)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("models", &self.models)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("warm_up", &self.warm_up)
            .finish()
    }
}

/// Size limits and budgets used by the processing stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Below this many characters no language is detected.
    pub min_detect_chars: usize,
    /// Only this many leading characters are given to the classifier.
    pub detect_sample_chars: usize,
    /// Maximum characters per translation request.
    pub chunk_size: usize,
    pub translation_max_tokens: usize,
    /// Below this many characters text is returned unsummarized.
    pub min_summary_input_chars: usize,
    /// Summarizer input is cut to this many leading characters.
    pub max_summary_input_chars: usize,
    pub summary_min_tokens: usize,
    pub summary_max_tokens: usize,
    pub tokens_per_word: f64,
}

impl PipelineConfig {
    /// Converts a word budget into model tokens.
    pub fn words_to_tokens(&self, words: usize) -> usize {
        (words as f64 * self.tokens_per_word) as usize
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_detect_chars: 10,
            detect_sample_chars: 500,
            chunk_size: 500,
            translation_max_tokens: 512,
            min_summary_input_chars: 200,
            max_summary_input_chars: 4000,
            summary_min_tokens: 50,
            summary_max_tokens: 150,
            tokens_per_word: 1.33,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parsing() {
        assert_eq!("hf".parse::<ModelBackend>().unwrap(), ModelBackend::HuggingFace);
        assert_eq!("Ollama".parse::<ModelBackend>().unwrap(), ModelBackend::Ollama);
        assert!("openai".parse::<ModelBackend>().is_err());
    }

    #[test]
    fn test_endpoint_defaults_per_backend() {
        let config = InferenceConfig::new(ModelBackend::Ollama);
        assert_eq!(config.endpoint().unwrap().as_str(), "http://localhost:11434/");
        assert_eq!(config.models.summarizer, "gemma3:12b");

        let mut config = InferenceConfig::default();
        config.endpoint = Some("not a url".to_string());
        assert!(matches!(config.endpoint(), Err(Error::Config(_))));
    }

    #[test]
    fn test_words_to_tokens() {
        let config = PipelineConfig::default();
        assert_eq!(config.words_to_tokens(100), 133);
        assert_eq!(config.words_to_tokens(0), 0);
        assert_eq!(config.words_to_tokens(3), 3);
    }

    #[test]
    fn test_api_key_is_redacted() {
        let mut config = InferenceConfig::default();
        config.api_key = Some("hf_secret".to_string());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hf_secret"));
        assert!(debug.contains("<redacted>"));
    }
}
