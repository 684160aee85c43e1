use nsum_core::LanguageCode;
use tracing::{info, warn};

use crate::chunker::Chunker;
use crate::registry::ModelRegistry;
use crate::stage::{SkipReason, StageOutput};

/// Translates article text into English, chunk by chunk.
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    chunker: Chunker,
    max_tokens: usize,
}

impl Translator {
    pub fn new(chunker: Chunker, max_tokens: usize) -> Self {
        Self { chunker, max_tokens }
    }

    /// English input passes through untouched and no model is loaded.
    /// Any model error yields the original text as a `Fallback`.
    pub async fn translate<'a>(
        &self,
        models: &ModelRegistry,
        text: &'a str,
        source: LanguageCode,
    ) -> StageOutput<'a> {
        if source.is_english() {
            info!("Text already in English, no translation needed");
            return StageOutput::Skipped {
                text,
                reason: SkipReason::AlreadyEnglish,
            };
        }

        let model = match models.translator(source).await {
            Ok(model) => model,
            Err(error) => {
                warn!("⚠️ Could not load {} translator, returning original text: {}", source.name(), error);
                return StageOutput::Fallback { text, error };
            }
        };

        let chunks = self.chunker.split(text);
        info!("Translating {} to English ({} chunk(s))...", source.name(), chunks.len());

        let mut translated = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            match model.translate(chunk, self.max_tokens).await {
                Ok(output) => translated.push(output),
                Err(error) => {
                    warn!(
                        "⚠️ Translation error on chunk {}/{}, returning original text: {}",
                        i + 1,
                        chunks.len(),
                        error
                    );
                    return StageOutput::Fallback { text, error };
                }
            }
        }

        let english = Chunker::join(&translated);
        info!("✨ Translation complete ({} chars)", english.chars().count());
        StageOutput::Transformed(english)
    }

    /// Like `translate`, for a raw language code. Codes outside the supported
    /// set pass through untranslated.
    pub async fn translate_code<'a>(
        &self,
        models: &ModelRegistry,
        text: &'a str,
        code: &str,
    ) -> StageOutput<'a> {
        match code.parse::<LanguageCode>() {
            Ok(source) => self.translate(models, text, source).await,
            Err(_) => {
                warn!("Unsupported source language: {}", code);
                StageOutput::Skipped {
                    text,
                    reason: SkipReason::UnsupportedLanguage(code.to_string()),
                }
            }
        }
    }
}
