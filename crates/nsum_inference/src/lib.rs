pub mod chunker;
pub mod config;
pub mod language;
pub mod models;
pub mod registry;
pub mod stage;
pub mod summarizer;
pub mod translator;

pub use chunker::Chunker;
pub use config::{InferenceConfig, ModelBackend, ModelNames, PipelineConfig};
pub use language::{Detection, LanguageClassifier, LanguageIdentifier, WhatlangClassifier};
pub use models::{create_loader, HttpModelLoader};
pub use registry::{ModelLoader, ModelRegistry};
pub use stage::{SkipReason, StageOutput};
pub use summarizer::Summarizer;
pub use translator::Translator;

pub mod prelude {
    pub use super::{
        create_loader, Chunker, InferenceConfig, LanguageIdentifier, ModelBackend, ModelRegistry,
        PipelineConfig, StageOutput, Summarizer, Translator,
    };
    pub use nsum_core::{Error, LanguageCode, Result};
}
