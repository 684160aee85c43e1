use nsum_core::{Result, SummarizationModel, SummaryParams, TranslationModel};

/// Offline translator that returns its input.
#[derive(Debug, Default)]
pub struct DummyTranslator;

#[async_trait::async_trait]
impl TranslationModel for DummyTranslator {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn translate(&self, text: &str, _max_length: usize) -> Result<String> {
        Ok(text.to_string())
    }
}

/// Offline summarizer that keeps the leading words, about 0.75 words per token.
#[derive(Debug, Default)]
pub struct DummySummarizer;

#[async_trait::async_trait]
impl SummarizationModel for DummySummarizer {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn summarize(&self, text: &str, params: SummaryParams) -> Result<String> {
        let words = (params.max_length * 3 / 4).max(1);
        Ok(text.split_whitespace().take(words).collect::<Vec<_>>().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dummy_models() {
        let translated = DummyTranslator.translate("Bonjour tout le monde", 512).await.unwrap();
        assert_eq!(translated, "Bonjour tout le monde");

        let text = "one two three four five six seven eight nine ten";
        let summary = DummySummarizer
            .summarize(text, SummaryParams::deterministic(4, 1))
            .await
            .unwrap();
        assert_eq!(summary, "one two three");

        let again = DummySummarizer
            .summarize(text, SummaryParams::deterministic(4, 1))
            .await
            .unwrap();
        assert_eq!(summary, again);
    }
}
