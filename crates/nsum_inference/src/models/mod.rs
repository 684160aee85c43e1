use std::sync::Arc;

use async_trait::async_trait;
use nsum_core::{Error, LanguageCode, Result, SummarizationModel, SummaryParams, TranslationModel};
use reqwest::Client;
use tracing::info;

use crate::config::{InferenceConfig, ModelBackend};
use crate::registry::ModelLoader;

pub mod dummy;
pub mod huggingface;
pub mod ollama;

use dummy::{DummySummarizer, DummyTranslator};
use huggingface::{HuggingFaceEndpoint, HuggingFaceSummarizer, HuggingFaceTranslator};
use ollama::{OllamaClient, OllamaSummarizer, OllamaTranslator};

const WARM_UP_SUMMARY_INPUT: &str = "The city council met on Monday to discuss the new budget. \
     Members agreed to fund road repairs and extend library opening hours.";

fn warm_up_text(source: LanguageCode) -> &'static str {
    match source {
        LanguageCode::Arabic => "مرحبا بالعالم",
        LanguageCode::French => "Bonjour tout le monde",
        LanguageCode::English => "Hello world",
    }
}

/// Builds model handles for the backend named in the configuration.
#[derive(Debug)]
pub struct HttpModelLoader {
    config: InferenceConfig,
    client: Client,
}

impl HttpModelLoader {
    pub fn new(config: InferenceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { config, client })
    }

    fn translator_name(&self, source: LanguageCode) -> Result<&str> {
        match source {
            LanguageCode::Arabic => Ok(&self.config.models.arabic_to_english),
            LanguageCode::French => Ok(&self.config.models.french_to_english),
            LanguageCode::English => Err(Error::ModelLoad("English needs no translation model".to_string())),
        }
    }

    fn probe_failed(model: &str, error: Error) -> Error {
        Error::ModelLoad(format!(
            "model '{}' did not answer its warm-up request: {}. Please ensure the inference endpoint is running",
            model, error
        ))
    }
}

#[async_trait]
impl ModelLoader for HttpModelLoader {
    async fn load_translator(&self, source: LanguageCode) -> Result<Arc<dyn TranslationModel>> {
        let name = self.translator_name(source)?;
        info!("   Model: {} ({})", name, self.config.backend);

        let model: Arc<dyn TranslationModel> = match self.config.backend {
            ModelBackend::HuggingFace => {
                let endpoint = HuggingFaceEndpoint::new(
                    self.client.clone(),
                    self.config.endpoint()?,
                    self.config.api_key.clone(),
                );
                Arc::new(HuggingFaceTranslator::new(endpoint, name))
            }
            ModelBackend::Ollama => {
                let client = OllamaClient::new(self.client.clone(), self.config.endpoint()?);
                Arc::new(OllamaTranslator::new(client, name, source))
            }
            ModelBackend::Dummy => Arc::new(DummyTranslator),
        };

        if self.config.warm_up {
            model
                .translate(warm_up_text(source), 32)
                .await
                .map_err(|e| Self::probe_failed(name, e))?;
        }
        Ok(model)
    }

    async fn load_summarizer(&self) -> Result<Arc<dyn SummarizationModel>> {
        let name = self.config.models.summarizer.as_str();
        info!("   Model: {} ({})", name, self.config.backend);

        let model: Arc<dyn SummarizationModel> = match self.config.backend {
            ModelBackend::HuggingFace => {
                let endpoint = HuggingFaceEndpoint::new(
                    self.client.clone(),
                    self.config.endpoint()?,
                    self.config.api_key.clone(),
                );
                Arc::new(HuggingFaceSummarizer::new(endpoint, name))
            }
            ModelBackend::Ollama => {
                let client = OllamaClient::new(self.client.clone(), self.config.endpoint()?);
                Arc::new(OllamaSummarizer::new(client, name))
            }
            ModelBackend::Dummy => Arc::new(DummySummarizer),
        };

        if self.config.warm_up {
            model
                .summarize(WARM_UP_SUMMARY_INPUT, SummaryParams::deterministic(20, 5))
                .await
                .map_err(|e| Self::probe_failed(name, e))?;
        }
        Ok(model)
    }
}

/// Creates the loader for the configured backend.
pub fn create_loader(config: InferenceConfig) -> Result<Arc<dyn ModelLoader>> {
    config.endpoint()?;
    Ok(Arc::new(HttpModelLoader::new(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dummy_loader_with_warm_up() {
        let mut config = InferenceConfig::new(ModelBackend::Dummy);
        config.warm_up = true;
        let loader = create_loader(config).unwrap();

        let translator = loader.load_translator(LanguageCode::French).await.unwrap();
        assert_eq!(translator.name(), "Dummy");

        let summarizer = loader.load_summarizer().await.unwrap();
        assert_eq!(summarizer.name(), "Dummy");
    }

    #[tokio::test]
    async fn test_loader_refuses_english_translator() {
        let loader = create_loader(InferenceConfig::new(ModelBackend::Dummy)).unwrap();
        assert!(matches!(
            loader.load_translator(LanguageCode::English).await,
            Err(Error::ModelLoad(_))
        ));
    }

    #[tokio::test]
    async fn test_huggingface_handles_are_named_after_models() {
        let loader = create_loader(InferenceConfig::default()).unwrap();
        let translator = loader.load_translator(LanguageCode::Arabic).await.unwrap();
        assert_eq!(translator.name(), "Helsinki-NLP/opus-mt-ar-en");
        let summarizer = loader.load_summarizer().await.unwrap();
        assert_eq!(summarizer.name(), "facebook/bart-large-cnn");
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let mut config = InferenceConfig::new(ModelBackend::Ollama);
        config.endpoint = Some("::nope".to_string());
        assert!(matches!(create_loader(config), Err(Error::Config(_))));
    }
}
