use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use nsum_core::{Error, LanguageCode, Result, SummarizationModel, TranslationModel};
use tokio::sync::OnceCell;
use tracing::info;

/// Builds model handles. Construction may take minutes.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    async fn load_translator(&self, source: LanguageCode) -> Result<Arc<dyn TranslationModel>>;

    async fn load_summarizer(&self) -> Result<Arc<dyn SummarizationModel>>;
}

/// Process-scoped model handles, each built on first demand and reused.
///
/// Concurrent first requests for the same handle wait on a single
/// construction. A failed construction leaves the slot empty so the next
/// request retries.
pub struct ModelRegistry {
    loader: Arc<dyn ModelLoader>,
    arabic: OnceCell<Arc<dyn TranslationModel>>,
    french: OnceCell<Arc<dyn TranslationModel>>,
    summarizer: OnceCell<Arc<dyn SummarizationModel>>,
}

impl ModelRegistry {
    pub fn new(loader: Arc<dyn ModelLoader>) -> Self {
        Self {
            loader,
            arabic: OnceCell::new(),
            french: OnceCell::new(),
            summarizer: OnceCell::new(),
        }
    }

    fn translator_slot(&self, source: LanguageCode) -> Option<&OnceCell<Arc<dyn TranslationModel>>> {
        match source {
            LanguageCode::Arabic => Some(&self.arabic),
            LanguageCode::French => Some(&self.french),
            LanguageCode::English => None,
        }
    }

    pub async fn translator(&self, source: LanguageCode) -> Result<Arc<dyn TranslationModel>> {
        let slot = self
            .translator_slot(source)
            .ok_or_else(|| Error::Config(format!("no translator exists for {}", source.name())))?;

        slot.get_or_try_init(|| async {
            info!("🧠 Loading {}→English translation model (first use only)...", source.name());
            let start = Instant::now();
            let model = self.loader.load_translator(source).await?;
            info!("✨ Model {} loaded in {:.1}s", model.name(), start.elapsed().as_secs_f64());
            Ok::<_, Error>(model)
        })
        .await
        .cloned()
    }

    pub async fn summarizer(&self) -> Result<Arc<dyn SummarizationModel>> {
        self.summarizer
            .get_or_try_init(|| async {
                info!("🧠 Loading summarization model (first use only)...");
                let start = Instant::now();
                let model = self.loader.load_summarizer().await?;
                info!("✨ Model {} loaded in {:.1}s", model.name(), start.elapsed().as_secs_f64());
                Ok::<_, Error>(model)
            })
            .await
            .cloned()
    }

    #[cfg(test)]
    fn is_translator_loaded(&self, source: LanguageCode) -> bool {
        self.translator_slot(source)
            .map(|slot| slot.initialized())
            .unwrap_or(false)
    }

    #[cfg(test)]
    fn is_summarizer_loaded(&self) -> bool {
        self.summarizer.initialized()
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("loader", &"<dyn ModelLoader>")
            .field("arabic", &self.arabic.initialized())
            .field("french", &self.french.initialized())
            .field("summarizer", &self.summarizer.initialized())
            .finish()
    }
}
