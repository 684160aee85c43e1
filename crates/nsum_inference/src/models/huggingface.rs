use std::fmt;

use async_trait::async_trait;
use nsum_core::{Error, Result, SummarizationModel, SummaryParams, TranslationModel};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Serialize)]
struct InferenceRequest<'a, P: Serialize> {
    inputs: &'a str,
    parameters: P,
    options: RequestOptions,
}

#[derive(Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

#[derive(Serialize)]
struct TranslationParameters {
    max_length: usize,
}

#[derive(Deserialize)]
struct TranslationOutput {
    translation_text: String,
}

#[derive(Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

/// Client for a Hugging Face style inference endpoint (`POST {endpoint}/{model}`).
#[derive(Clone)]
pub struct HuggingFaceEndpoint {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HuggingFaceEndpoint {
    pub fn new(client: Client, base_url: Url, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), model)
    }

    async fn infer<P, O>(&self, model: &str, inputs: &str, parameters: P) -> Result<O>
    where
        P: Serialize + Send,
        O: DeserializeOwned,
    {
        let request = InferenceRequest {
            inputs,
            parameters,
            options: RequestOptions { wait_for_model: true },
        };

        let mut builder = self.client.post(self.model_url(model)).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let mut outputs = builder
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<O>>()
            .await?;

        if outputs.is_empty() {
            return Err(Error::Inference(format!("{} returned no output", model)));
        }
        Ok(outputs.swap_remove(0))
    }
}

impl fmt::Debug for HuggingFaceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceEndpoint")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug)]
pub struct HuggingFaceTranslator {
    endpoint: HuggingFaceEndpoint,
    model: String,
}

impl HuggingFaceTranslator {
    pub fn new(endpoint: HuggingFaceEndpoint, model: impl Into<String>) -> Self {
        Self {
            endpoint,
            model: model.into(),
        }
    }
}

#[async_trait]
impl TranslationModel for HuggingFaceTranslator {
    fn name(&self) -> &str {
        &self.model
    }

    async fn translate(&self, text: &str, max_length: usize) -> Result<String> {
        let output: TranslationOutput = self
            .endpoint
            .infer(&self.model, text, TranslationParameters { max_length })
            .await?;
        Ok(output.translation_text)
    }
}

#[derive(Debug)]
pub struct HuggingFaceSummarizer {
    endpoint: HuggingFaceEndpoint,
    model: String,
}

impl HuggingFaceSummarizer {
    pub fn new(endpoint: HuggingFaceEndpoint, model: impl Into<String>) -> Self {
        Self {
            endpoint,
            model: model.into(),
        }
    }
}

#[async_trait]
impl SummarizationModel for HuggingFaceSummarizer {
    fn name(&self) -> &str {
        &self.model
    }

    async fn summarize(&self, text: &str, params: SummaryParams) -> Result<String> {
        let output: SummaryOutput = self.endpoint.infer(&self.model, text, params).await?;
        Ok(output.summary_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(base: &str) -> HuggingFaceEndpoint {
        HuggingFaceEndpoint::new(Client::new(), Url::parse(base).unwrap(), Some("hf_token".to_string()))
    }

    #[test]
    fn test_model_url_joins_without_double_slash() {
        let ep = endpoint("https://api-inference.huggingface.co/models/");
        assert_eq!(
            ep.model_url("Helsinki-NLP/opus-mt-ar-en"),
            "https://api-inference.huggingface.co/models/Helsinki-NLP/opus-mt-ar-en"
        );
    }

    #[test]
    fn test_summary_request_shape() {
        let request = InferenceRequest {
            inputs: "text",
            parameters: SummaryParams::deterministic(133, 50),
            options: RequestOptions { wait_for_model: true },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["parameters"]["do_sample"], false);
        assert_eq!(json["parameters"]["max_length"], 133);
        assert_eq!(json["options"]["wait_for_model"], true);
    }

    #[test]
    fn test_debug_hides_token() {
        let debug = format!("{:?}", HuggingFaceTranslator::new(endpoint("http://localhost:8080"), "m"));
        assert!(!debug.contains("hf_token"));
    }
}
