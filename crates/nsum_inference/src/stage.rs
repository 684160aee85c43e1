use std::fmt;

use nsum_core::Error;

/// Why a stage left its input untouched on purpose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyEnglish,
    UnsupportedLanguage(String),
    TooShort { chars: usize, minimum: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyEnglish => f.write_str("text already in English"),
            SkipReason::UnsupportedLanguage(code) => write!(f, "unsupported source language '{}'", code),
            SkipReason::TooShort { chars, minimum } => {
                write!(f, "text too short ({} chars, need {})", chars, minimum)
            }
        }
    }
}

/// Output of a text stage that never aborts the pipeline.
///
/// `Skipped` and `Fallback` borrow from the stage input, so pass-through
/// returns the caller's own text.
#[derive(Debug)]
pub enum StageOutput<'a> {
    Transformed(String),
    Skipped { text: &'a str, reason: SkipReason },
    Fallback { text: &'a str, error: Error },
}

impl<'a> StageOutput<'a> {
    pub fn text(&self) -> &str {
        match self {
            StageOutput::Transformed(text) => text,
            StageOutput::Skipped { text, .. } => text,
            StageOutput::Fallback { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            StageOutput::Transformed(text) => text,
            StageOutput::Skipped { text, .. } => text.to_string(),
            StageOutput::Fallback { text, .. } => text.to_string(),
        }
    }

    pub fn is_transformed(&self) -> bool {
        matches!(self, StageOutput::Transformed(_))
    }

    /// True when the stage wanted to run but had to fall back.
    pub fn is_degraded(&self) -> bool {
        matches!(self, StageOutput::Fallback { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            StageOutput::Transformed(_) => "transformed",
            StageOutput::Skipped { .. } => "skipped",
            StageOutput::Fallback { .. } => "fallback",
        }
    }
}
