//! Language capabilities consumed by the analyzer
//!
//! Detection and linguistic analysis are external capabilities. The engine
//! only sees the [`LanguageDetector`] and [`LinguisticAnalyzer`] traits; the
//! baseline implementations here are used when nothing better is registered.

pub mod detect;
pub mod lemma;

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::warn;
use unicode_segmentation::UnicodeSegmentation;

pub use detect::StopwordDetector;

/// Language used when detection fails or yields an unsupported code
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub lemma: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub text: String,
    pub tokens: Vec<Token>,
}

impl Sentence {
    /// True if any token's lemma is one of `lemmas`
    pub fn has_lemma_in(&self, lemmas: &[&str]) -> bool {
        self.tokens
            .iter()
            .any(|token| lemmas.contains(&token.lemma.as_str()))
    }
}

/// Sentence and lemma analysis of a text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextAnalysis {
    pub sentences: Vec<Sentence>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    #[error("No language signal in sample")]
    NoSignal,

    #[error("Language detection failed: {0}")]
    Backend(String),
}

/// A per-language model could not be loaded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Linguistic model for '{language}' unavailable: {reason}")]
pub struct ModelUnavailable {
    pub language: String,
    pub reason: String,
}

pub trait LanguageDetector: Send + Sync {
    /// Detect the language of a text sample, as an ISO 639-1 code
    fn detect(&self, sample: &str) -> Result<String, DetectionError>;
}

pub trait LinguisticAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> TextAnalysis;
}

/// Baseline analyzer: Unicode sentence bounds plus rule-based lemmas
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedAnalyzer;

impl LinguisticAnalyzer for RuleBasedAnalyzer {
    fn analyze(&self, text: &str) -> TextAnalysis {
        let sentences = text
            .split_sentence_bounds()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Sentence {
                text: s.to_string(),
                tokens: s
                    .unicode_words()
                    .map(|word| Token {
                        text: word.to_string(),
                        lemma: lemma::lemmatize(word),
                    })
                    .collect(),
            })
            .collect();

        TextAnalysis { sentences }
    }
}

/// Loader for a per-language model
pub type ModelLoader =
    Box<dyn FnOnce() -> Result<Arc<dyn LinguisticAnalyzer>, ModelUnavailable> + Send>;

/// Immutable registry of per-language analysis models
///
/// The set of registered languages is also the set of supported document
/// languages: detection results outside it fall back to the default.
#[derive(Clone)]
pub struct LanguageModels {
    models: HashMap<String, Arc<dyn LinguisticAnalyzer>>,
    baseline: Arc<dyn LinguisticAnalyzer>,
}

impl LanguageModels {
    pub fn new(baseline: Arc<dyn LinguisticAnalyzer>) -> Self {
        Self {
            models: HashMap::new(),
            baseline,
        }
    }

    pub fn with_model(mut self, language: &str, model: Arc<dyn LinguisticAnalyzer>) -> Self {
        self.models.insert(language.to_string(), model);
        self
    }

    /// Register the model produced by `loader`, or the baseline if loading fails
    pub fn load(mut self, language: &str, loader: ModelLoader) -> Self {
        let model = match loader() {
            Ok(model) => model,
            Err(e) => {
                warn!("{}; falling back to baseline model", e);
                self.baseline.clone()
            }
        };
        self.models.insert(language.to_string(), model);
        self
    }

    pub fn supports(&self, language: &str) -> bool {
        self.models.contains_key(language)
    }

    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.models.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    /// Model for `language`, or the baseline when none is registered
    pub fn model_for(&self, language: &str) -> &dyn LinguisticAnalyzer {
        self.models
            .get(language)
            .map(|m| m.as_ref())
            .unwrap_or(self.baseline.as_ref())
    }
}

impl Default for LanguageModels {
    /// English, Spanish, French and Arabic, all served by the baseline analyzer
    fn default() -> Self {
        let baseline: Arc<dyn LinguisticAnalyzer> = Arc::new(RuleBasedAnalyzer);
        ["en", "es", "fr", "ar"]
            .iter()
            .fold(Self::new(baseline.clone()), |models, lang| {
                models.with_model(lang, baseline.clone())
            })
    }
}

impl std::fmt::Debug for LanguageModels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageModels")
            .field("languages", &self.languages())
            .finish()
    }
}
