use std::fmt;

use async_trait::async_trait;
use nsum_core::{LanguageCode, Result, SummarizationModel, SummaryParams, TranslationModel};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

/// Fixed seed so that generation is reproducible.
const SEED: u64 = 0;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    seed: u64,
    num_predict: usize,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Prompt-driven models served by an Ollama instance.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: Url,
}

impl OllamaClient {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    async fn generate(&self, model: &str, prompt: String, num_predict: usize) -> Result<String> {
        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: 0.0,
                seed: SEED,
                num_predict,
            },
        };

        let url = format!("{}/api/generate", self.base_url.as_str().trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateResponse>()
            .await?;

        Ok(response.response.trim().to_string())
    }
}

impl fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OllamaClient")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[derive(Debug)]
pub struct OllamaTranslator {
    client: OllamaClient,
    model: String,
    source: LanguageCode,
}

impl OllamaTranslator {
    pub fn new(client: OllamaClient, model: impl Into<String>, source: LanguageCode) -> Self {
        Self {
            client,
            model: model.into(),
            source,
        }
    }

    fn prompt(&self, text: &str) -> String {
        format!(
            "Translate the following {} text into English. Reply with the English translation only.\n\n{}",
            self.source.name(),
            text
        )
    }
}

#[async_trait]
impl TranslationModel for OllamaTranslator {
    fn name(&self) -> &str {
        &self.model
    }

    async fn translate(&self, text: &str, max_length: usize) -> Result<String> {
        self.client.generate(&self.model, self.prompt(text), max_length).await
    }
}

#[derive(Debug)]
pub struct OllamaSummarizer {
    client: OllamaClient,
    model: String,
}

impl OllamaSummarizer {
    pub fn new(client: OllamaClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    fn prompt(text: &str, params: &SummaryParams) -> String {
        format!(
            "Summarize the following news article in English in {} to {} tokens. \
             Reply with the summary only.\n\n{}",
            params.min_length, params.max_length, text
        )
    }
}

#[async_trait]
impl SummarizationModel for OllamaSummarizer {
    fn name(&self) -> &str {
        &self.model
    }

    async fn summarize(&self, text: &str, params: SummaryParams) -> Result<String> {
        self.client
            .generate(&self.model, Self::prompt(text, &params), params.max_length)
            .await
    }
}
