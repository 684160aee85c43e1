use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A loaded translation model for one source language into English.
#[async_trait]
pub trait TranslationModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Translate a single model-sized piece of text. `max_length` is in model tokens.
    async fn translate(&self, text: &str, max_length: usize) -> Result<String>;
}

/// Decoding parameters for a summarization call, in model tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryParams {
    pub max_length: usize,
    pub min_length: usize,
    pub do_sample: bool,
}

impl SummaryParams {
    /// Greedy decoding, with `min_length` never above `max_length`.
    pub fn deterministic(max_length: usize, min_length: usize) -> Self {
        Self {
            max_length,
            min_length: min_length.min(max_length),
            do_sample: false,
        }
    }
}

/// A loaded abstractive summarization model.
#[async_trait]
pub trait SummarizationModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    async fn summarize(&self, text: &str, params: SummaryParams) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_params_clamp_min_length() {
        let params = SummaryParams::deterministic(39, 50);
        assert_eq!(params.min_length, 39);
        assert!(!params.do_sample);

        let params = SummaryParams::deterministic(133, 50);
        assert_eq!(params.min_length, 50);
        assert_eq!(params.max_length, 133);
    }
}
