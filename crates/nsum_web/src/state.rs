use std::sync::Arc;

use nsum_pipeline::NewsSummarizer;

#[derive(Clone)]
pub struct AppState {
    pub summarizer: Arc<NewsSummarizer>,
}

impl AppState {
    pub fn new(summarizer: Arc<NewsSummarizer>) -> Self {
        Self { summarizer }
    }
}
