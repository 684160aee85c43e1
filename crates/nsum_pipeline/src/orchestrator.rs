use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{SubsecRound, Utc};
use nsum_core::{
    LanguageCode, ProcessedArticle, RawArticle, Result, UnsupportedReason, NOT_AVAILABLE,
    UNKNOWN_SOURCE, UNTITLED,
};
use nsum_inference::{
    Chunker, Detection, LanguageIdentifier, ModelRegistry, PipelineConfig, Summarizer, Translator,
    WhatlangClassifier,
};
use tracing::{info, warn};

fn or_sentinel(value: &str, sentinel: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        sentinel.to_string()
    } else {
        value.to_string()
    }
}

/// Runs one article through detect, translate and summarize.
///
/// Only detection can abort a run: translation and summarization degrade to
/// pass-through on failure. Model handles come from the shared
/// [`ModelRegistry`], so every orchestrator built on the same registry reuses
/// the same loaded models.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    models: Arc<ModelRegistry>,
    identifier: LanguageIdentifier,
    translator: Translator,
    summarizer: Summarizer,
    config: PipelineConfig,
}

impl Orchestrator {
    pub fn new(models: Arc<ModelRegistry>, config: PipelineConfig) -> Self {
        let identifier = LanguageIdentifier::new(
            Arc::new(WhatlangClassifier),
            config.min_detect_chars,
            config.detect_sample_chars,
        );
        Self {
            models,
            identifier,
            translator: Translator::new(Chunker::new(config.chunk_size), config.translation_max_tokens),
            summarizer: Summarizer::new(config.min_summary_input_chars, config.max_summary_input_chars),
            config,
        }
    }

    pub fn with_identifier(mut self, identifier: LanguageIdentifier) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Classification is CPU bound and runs on the blocking pool.
    pub async fn detect(&self, text: &str) -> Detection {
        let identifier = self.identifier.clone();
        let text = text.to_string();
        match tokio::task::spawn_blocking(move || identifier.identify(&text)).await {
            Ok(detection) => detection,
            Err(e) => {
                warn!("Language detection task failed: {}", e);
                Detection::Unsupported(UnsupportedReason::Classifier(e.to_string()))
            }
        }
    }

    /// `summary_max_length` is in model tokens.
    pub async fn process(&self, raw: &RawArticle, summary_max_length: usize) -> Result<ProcessedArticle> {
        let started = Instant::now();
        info!("🔄 Processing article: {}", raw.url);

        let language: LanguageCode = match self.detect(&raw.text).await.into_result() {
            Ok(language) => language,
            Err(e) => {
                warn!("❌ Aborting {}: {}", raw.url, e);
                return Err(e);
            }
        };

        let english = self.translator.translate(&self.models, &raw.text, language).await;
        if english.is_degraded() {
            warn!("Continuing with untranslated text for {}", raw.url);
        }

        let summary = self
            .summarizer
            .summarize(
                &self.models,
                english.text(),
                summary_max_length,
                self.config.summary_min_tokens,
            )
            .await;
        info!("Stages for {}: translate={}, summarize={}", raw.url, english.label(), summary.label());
        let summary = summary.into_text();
        let english_text = english.into_text();

        let elapsed = started.elapsed();
        let processing_time = Duration::from_millis(elapsed.as_millis() as u64);
        info!("✨ Processed {} in {:.2}s", raw.url, elapsed.as_secs_f64());

        Ok(ProcessedArticle {
            url: raw.url.clone(),
            source: or_sentinel(&raw.source, UNKNOWN_SOURCE),
            title: or_sentinel(&raw.title, UNTITLED),
            language,
            original_text: raw.text.clone(),
            english_text,
            summary,
            published: or_sentinel(raw.date.as_deref().unwrap_or_default(), NOT_AVAILABLE),
            processing_time,
            processed_at: Utc::now().trunc_subsecs(6),
        })
    }
}
