use nsum_core::{Error, SummaryParams};
use tracing::{info, warn};

use crate::chunker::{char_len, leading_chars};
use crate::registry::ModelRegistry;
use crate::stage::{SkipReason, StageOutput};

/// Reduces English text to an abstractive summary.
#[derive(Debug, Clone, Copy)]
pub struct Summarizer {
    min_input_chars: usize,
    max_input_chars: usize,
}

impl Summarizer {
    pub fn new(min_input_chars: usize, max_input_chars: usize) -> Self {
        Self {
            min_input_chars,
            max_input_chars,
        }
    }

    /// `max_length` and `min_length` are model tokens. Short input is returned
    /// as is; long input is cut to its leading part before the model sees it.
    /// On model failure the (possibly cut) input comes back as a `Fallback`.
    pub async fn summarize<'a>(
        &self,
        models: &ModelRegistry,
        text: &'a str,
        max_length: usize,
        min_length: usize,
    ) -> StageOutput<'a> {
        let chars = char_len(text);
        if chars < self.min_input_chars {
            info!("Text too short for summarization (< {} chars)", self.min_input_chars);
            return StageOutput::Skipped {
                text,
                reason: SkipReason::TooShort {
                    chars,
                    minimum: self.min_input_chars,
                },
            };
        }

        let input = leading_chars(text, self.max_input_chars);
        if input.len() < text.len() {
            info!("Text is long, using first {} characters", self.max_input_chars);
        }

        let model = match models.summarizer().await {
            Ok(model) => model,
            Err(error) => {
                warn!("⚠️ Could not load summarizer, returning text unsummarized: {}", error);
                return StageOutput::Fallback { text: input, error };
            }
        };

        info!("📝 Generating summary from {} characters...", char_len(input));
        let params = SummaryParams::deterministic(max_length, min_length);
        match model.summarize(input, params).await {
            Ok(summary) if !summary.trim().is_empty() => {
                let summary = summary.trim().to_string();
                info!("✨ Summary generated ({} characters)", summary.chars().count());
                StageOutput::Transformed(summary)
            }
            Ok(_) => {
                warn!("⚠️ Summarizer returned an empty summary, returning text unsummarized");
                StageOutput::Fallback {
                    text: input,
                    error: Error::Inference("empty summary".to_string()),
                }
            }
            Err(error) => {
                warn!("⚠️ Summarization error, returning text unsummarized: {}", error);
                StageOutput::Fallback { text: input, error }
            }
        }
    }
}
