//! Translation capability
//!
//! Translators report failures as [`TranslationError`]. The analyzer and the
//! aggregator convert a failure into passthrough of the source text via
//! [`translate_or_passthrough`], so a broken translation service can degrade
//! output language but never abort an analysis.
//!
//! Implementations bound their own calls and report an overrun as
//! [`TranslationError::Timeout`].

use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("Translation timed out after {0}ms")]
    Timeout(u64),

    #[error("Translation service unavailable: {0}")]
    Unavailable(String),

    #[error("Unsupported language pair {src} -> {dest}")]
    UnsupportedPair { src: String, dest: String },
}

pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, src: &str, dest: &str) -> Result<String, TranslationError>;
}

/// Returns text unchanged. Used when no translation service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

impl Translator for PassthroughTranslator {
    fn translate(&self, text: &str, _src: &str, _dest: &str) -> Result<String, TranslationError> {
        Ok(text.to_string())
    }
}

/// Translate `text`, skipping the call for empty text or identical languages
pub fn translate_checked(
    translator: &dyn Translator,
    text: &str,
    src: &str,
    dest: &str,
) -> Result<String, TranslationError> {
    if text.is_empty() || src == dest {
        return Ok(text.to_string());
    }
    translator.translate(text, src, dest)
}

/// Translate `text`, returning it unchanged on any failure.
///
/// Empty text and identical source/destination languages skip the call.
pub fn translate_or_passthrough(
    translator: &dyn Translator,
    text: &str,
    src: &str,
    dest: &str,
) -> String {
    match translate_checked(translator, text, src, dest) {
        Ok(translated) => translated,
        Err(e) => {
            warn!("Translation {} -> {} failed, keeping source text: {}", src, dest, e);
            text.to_string()
        }
    }
}


#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::testing::{FailingTranslator, TaggingTranslator};
    use super::*;

    #[test]
    fn test_failure_passes_text_through() {
        let out = translate_or_passthrough(&FailingTranslator, "Mandatory disclosure missing.", "en", "fr");
        assert_eq!(out, "Mandatory disclosure missing.");
    }

    #[test]
    fn test_same_language_skips_translator() {
        let translator = TaggingTranslator::default();
        assert_eq!(translate_or_passthrough(&translator, "text", "en", "en"), "text");
        assert_eq!(translate_or_passthrough(&translator, "", "en", "fr"), "");
        assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_successful_translation() {
        let translator = TaggingTranslator::default();
        assert_eq!(translate_or_passthrough(&translator, "text", "en", "es"), "[es] text");
        assert_eq!(translator.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_checked_reports_failure() {
        assert_eq!(
            translate_checked(&FailingTranslator, "text", "en", "fr"),
            Err(TranslationError::Unavailable("offline".to_string()))
        );
        assert_eq!(translate_checked(&FailingTranslator, "text", "fr", "fr"), Ok("text".to_string()));
    }
}
