#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nsum_core::{
    ArticleStore, LanguageCode, RawArticle, Result, SummarizationModel, SummaryParams,
    TranslationModel,
};
use nsum_inference::{ModelLoader, ModelRegistry, PipelineConfig};
use nsum_pipeline::{CacheGateway, Orchestrator};

/// Shared counters so tests can see which models were built and called.
#[derive(Debug, Default)]
pub struct Calls {
    pub translator_loads: AtomicUsize,
    pub summarizer_loads: AtomicUsize,
    pub translations: AtomicUsize,
    pub summaries: AtomicUsize,
}

impl Calls {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
struct TaggingTranslator {
    calls: Arc<Calls>,
}

#[async_trait]
impl TranslationModel for TaggingTranslator {
    fn name(&self) -> &str {
        "tagging"
    }

    async fn translate(&self, text: &str, _max_length: usize) -> Result<String> {
        self.calls.translations.fetch_add(1, Ordering::SeqCst);
        Ok(format!("[en] {}", text.trim()))
    }
}

/// Keeps the leading words, after a delay standing in for inference time.
#[derive(Debug)]
struct SlowSummarizer {
    calls: Arc<Calls>,
    delay: Duration,
}

#[async_trait]
impl SummarizationModel for SlowSummarizer {
    fn name(&self) -> &str {
        "slow"
    }

    async fn summarize(&self, text: &str, params: SummaryParams) -> Result<String> {
        self.calls.summaries.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        let words = params.max_length * 3 / 4;
        Ok(text.split_whitespace().take(words).collect::<Vec<_>>().join(" "))
    }
}

pub struct StubLoader {
    pub calls: Arc<Calls>,
    pub delay: Duration,
}

#[async_trait]
impl ModelLoader for StubLoader {
    async fn load_translator(&self, _source: LanguageCode) -> Result<Arc<dyn TranslationModel>> {
        self.calls.translator_loads.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(TaggingTranslator {
            calls: self.calls.clone(),
        }))
    }

    async fn load_summarizer(&self) -> Result<Arc<dyn SummarizationModel>> {
        self.calls.summarizer_loads.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(SlowSummarizer {
            calls: self.calls.clone(),
            delay: self.delay,
        }))
    }
}

pub fn gateway(store: Arc<dyn ArticleStore>, delay: Duration) -> (CacheGateway, Arc<Calls>) {
    let calls = Arc::new(Calls::default());
    let loader = Arc::new(StubLoader {
        calls: calls.clone(),
        delay,
    });
    let orchestrator = Orchestrator::new(Arc::new(ModelRegistry::new(loader)), PipelineConfig::default());
    (CacheGateway::new(store, Arc::new(orchestrator)), calls)
}

const ENGLISH_SENTENCES: &[&str] = &[
    "The government announced on Monday that it would increase funding for public schools across the country.",
    "Officials said the new budget includes money for teacher salaries, school buildings and classroom equipment.",
    "Opposition leaders welcomed the decision but warned that the plan does not address rising living costs.",
    "Economists expect the measures to have a limited effect on inflation during the coming months.",
    "Parents and teachers gathered outside the ministry to demand that the changes take effect before the new school year.",
];

const FRENCH_SENTENCES: &[&str] = &[
    "Le gouvernement a annoncé lundi une hausse du financement des écoles publiques dans tout le pays.",
    "Les responsables ont déclaré que le nouveau budget comprend des fonds pour les salaires des enseignants.",
    "Les dirigeants de l'opposition ont salué la décision mais ont averti que le plan ne répond pas à la hausse du coût de la vie.",
    "Les économistes s'attendent à ce que ces mesures aient un effet limité sur l'inflation dans les mois à venir.",
];

fn text_of(sentences: &[&str], words: usize) -> String {
    let mut out: Vec<&str> = Vec::with_capacity(words);
    for sentence in sentences.iter().cycle() {
        for word in sentence.split_whitespace() {
            if out.len() == words {
                return out.join(" ");
            }
            out.push(word);
        }
    }
    unreachable!("cycle never ends")
}

pub fn english_text(words: usize) -> String {
    text_of(ENGLISH_SENTENCES, words)
}

pub fn french_text(words: usize) -> String {
    text_of(FRENCH_SENTENCES, words)
}

pub fn raw(url: &str, text: String) -> RawArticle {
    RawArticle {
        url: url.to_string(),
        source: "Example".to_string(),
        title: "Schools get more funding".to_string(),
        text,
        date: Some("2025-01-28".to_string()),
    }
}
