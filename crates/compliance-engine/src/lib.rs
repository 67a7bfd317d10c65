//! Disclosure compliance engine
//!
//! Scores free-form report text against a catalog of reporting-standard
//! disclosures (GRI, IFRS). Each disclosure goes through:
//! 1. Matching: addressed, mentioned or absent ([`matcher`])
//! 2. Omission rules: user-declared or document-stated reasons ([`omission`])
//! 3. Scoring: weighted score, remark and suggestion ([`scoring`])
//!
//! Remarks and suggestions are translated into the requested output language.
//! Stored reports are rolled up by [`aggregator`].

pub mod aggregator;
pub mod cancel;
pub mod catalog;
pub mod error;
pub mod frameworks;
pub mod language;
pub mod matcher;
pub mod omission;
pub mod patterns;
pub mod scoring;
#[cfg(feature = "server")]
pub mod service;
#[cfg(feature = "server")]
pub mod store;
pub mod translation;

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::Arc;

use shared_types::{AnalyticsSummary, ComplianceReport, ReportRow, StoredReport, Suggestion};
use tracing::{debug, info, warn};

pub use cancel::CancelToken;
pub use catalog::{Catalog, DisclosureSpec, FrameworkCatalog, StandardGroup, StandardSpec};
pub use error::{CatalogError, EngineError, StoreError};
pub use language::{LanguageDetector, LanguageModels, LinguisticAnalyzer, DEFAULT_LANGUAGE};
pub use translation::{TranslationError, Translator};

use crate::language::StopwordDetector;
use crate::matcher::Reference;
use crate::scoring::Scored;
use crate::translation::{translate_checked, PassthroughTranslator};

/// Characters of the document used for language detection
pub const DETECTION_SAMPLE_CHARS: usize = 500;

/// A finished analysis
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub report: ComplianceReport,
    /// Language the remarks and suggestions are actually written in: the
    /// requested output language, or the document language if any
    /// translation fell back to the source text
    pub language: String,
}

/// Result of an analysis that may be abandoned by its caller
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Completed(Analysis),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Fallback when detection fails or yields an unsupported language
    pub default_language: String,
    pub detection_sample_chars: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            detection_sample_chars: DETECTION_SAMPLE_CHARS,
        }
    }
}

/// ComplianceEngine entry point
///
/// Immutable after construction and safe to share across threads; concurrent
/// analyses need no coordination.
pub struct ComplianceEngine {
    catalog: Arc<Catalog>,
    /// Per framework, one compiled reference per report row
    references: HashMap<String, Vec<Reference>>,
    models: LanguageModels,
    detector: Arc<dyn LanguageDetector>,
    /// `None` leaves output in the document language
    translator: Option<Arc<dyn Translator>>,
    config: EngineConfig,
}

impl ComplianceEngine {
    /// Engine with the built-in catalog, baseline language models and no translation
    pub fn new() -> Result<Self, EngineError> {
        Self::builder().build()
    }

    pub fn builder() -> ComplianceEngineBuilder {
        ComplianceEngineBuilder::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn translator(&self) -> Option<&dyn Translator> {
        self.translator.as_deref()
    }

    /// Detect the document language from a bounded prefix of `text`
    pub fn detect_language(&self, text: &str) -> String {
        let sample = patterns::text_prefix(text, self.config.detection_sample_chars);
        match self.detector.detect(sample) {
            Ok(lang) if self.models.supports(&lang) => lang,
            Ok(lang) => {
                debug!(
                    "Detected unsupported language '{}', using '{}'",
                    lang, self.config.default_language
                );
                self.config.default_language.clone()
            }
            Err(e) => {
                debug!(
                    "Language detection failed ({}), using '{}'",
                    e, self.config.default_language
                );
                self.config.default_language.clone()
            }
        }
    }

    /// Analyze `text` against `framework`.
    ///
    /// `user_omissions` maps `"{group}_{disclosure id}"` to a declared reason.
    pub fn analyze_text(
        &self,
        text: &str,
        framework: &str,
        user_omissions: &HashMap<String, String>,
        output_lang: &str,
    ) -> Result<ComplianceReport, EngineError> {
        match self.analyze_text_cancellable(
            text,
            framework,
            user_omissions,
            output_lang,
            &CancelToken::new(),
        )? {
            AnalysisOutcome::Completed(analysis) => Ok(analysis.report),
            // The token is local, so this arm is never taken
            AnalysisOutcome::Cancelled => Ok(ComplianceReport::default()),
        }
    }

    /// Like [`analyze_text`](Self::analyze_text), abandoning the run at the
    /// next disclosure boundary once `cancel` is raised
    pub fn analyze_text_cancellable(
        &self,
        text: &str,
        framework: &str,
        user_omissions: &HashMap<String, String>,
        output_lang: &str,
        cancel: &CancelToken,
    ) -> Result<AnalysisOutcome, EngineError> {
        let (catalog, references) = match (
            self.catalog.framework(framework),
            self.references.get(framework),
        ) {
            (Some(catalog), Some(references)) => (catalog, references),
            _ => return Err(EngineError::UnknownFramework(framework.to_string())),
        };

        let doc_lang = self.detect_language(text);
        let localizer = Localizer {
            translator: self.translator.as_deref(),
            src: &doc_lang,
            dest: output_lang,
            fell_back: Cell::new(false),
        };

        let mut report = ComplianceReport::default();

        match catalog {
            FrameworkCatalog::Grouped { groups } => {
                let analysis = self.models.model_for(&doc_lang).analyze(text);
                let lowered = text.to_lowercase();

                let rows = groups
                    .iter()
                    .flat_map(|group| group.disclosures.iter().map(move |spec| (group, spec)));

                for ((group, spec), reference) in rows.zip(references) {
                    if cancel.is_cancelled() {
                        info!("Analysis against {} cancelled at {}", framework, spec.id);
                        return Ok(AnalysisOutcome::Cancelled);
                    }

                    let classification = matcher::classify(text, reference, &analysis);
                    let user_reason = user_omissions
                        .get(&format!("{}_{}", group.name, spec.id))
                        .map(String::as_str);
                    let resolution = omission::resolve(spec, classification, user_reason, &lowered);

                    debug!(
                        "{} {}: {:?} / {:?}",
                        group.name, spec.id, classification, resolution
                    );

                    let scored = scoring::score_disclosure(spec, classification, &resolution);
                    localizer.push(
                        &mut report,
                        &group.name,
                        spec.requirement(),
                        spec.sector_ref.clone(),
                        scored,
                    );
                }
            }
            FrameworkCatalog::Flat { standards } => {
                for (standard, reference) in standards.iter().zip(references) {
                    if cancel.is_cancelled() {
                        info!("Analysis against {} cancelled at {}", framework, standard.code);
                        return Ok(AnalysisOutcome::Cancelled);
                    }

                    let scored = scoring::score_standard(standard, reference.is_found_in(text));
                    localizer.push(&mut report, &standard.code, standard.title.clone(), None, scored);
                }
            }
        }

        let language = if localizer.fell_back.get() {
            doc_lang.clone()
        } else {
            output_lang.to_string()
        };

        info!(
            "Analyzed {} document against {}: {} rows, {} suggestions, written in {}",
            doc_lang,
            framework,
            report.report.len(),
            report.suggestions.len(),
            language
        );

        Ok(AnalysisOutcome::Completed(Analysis { report, language }))
    }

    /// Roll stored reports up into per-standard statistics in `output_lang`
    pub fn aggregate_reports(&self, reports: &[StoredReport], output_lang: &str) -> AnalyticsSummary {
        let translator = self.translator.as_deref().unwrap_or(&PassthroughTranslator);
        aggregator::aggregate(reports, output_lang, translator)
    }
}

/// Translates scored output from the document language into the output language
struct Localizer<'a> {
    translator: Option<&'a dyn Translator>,
    src: &'a str,
    dest: &'a str,
    /// Set once any text had to be kept in the source language
    fell_back: Cell<bool>,
}

impl Localizer<'_> {
    fn text(&self, text: &str) -> String {
        let Some(translator) = self.translator else {
            if !text.is_empty() && self.src != self.dest {
                self.fell_back.set(true);
            }
            return text.to_string();
        };

        match translate_checked(translator, text, self.src, self.dest) {
            Ok(translated) => translated,
            Err(e) => {
                warn!(
                    "Translation {} -> {} failed, keeping source text: {}",
                    self.src, self.dest, e
                );
                self.fell_back.set(true);
                text.to_string()
            }
        }
    }

    fn push(
        &self,
        report: &mut ComplianceReport,
        standard: &str,
        requirement: String,
        sector_ref: Option<String>,
        scored: Scored,
    ) {
        if let Some(suggestion) = &scored.suggestion {
            report.suggestions.push(Suggestion {
                standard: standard.to_string(),
                suggestion: self.text(suggestion),
            });
        }

        report.report.push(ReportRow {
            standard: standard.to_string(),
            requirement,
            compliance_score: scored.score,
            remarks: self.text(&scored.remark),
            omission: scored.omission.map(|o| shared_types::Omission {
                reason: self.text(&o.reason),
                explanation: self.text(&o.explanation),
            }),
            sector_ref,
        });
    }
}

#[derive(Default)]
pub struct ComplianceEngineBuilder {
    catalog: Option<Arc<Catalog>>,
    models: Option<LanguageModels>,
    detector: Option<Arc<dyn LanguageDetector>>,
    translator: Option<Arc<dyn Translator>>,
    config: EngineConfig,
}

impl ComplianceEngineBuilder {
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(Arc::new(catalog));
        self
    }

    pub fn language_models(mut self, models: LanguageModels) -> Self {
        self.models = Some(models);
        self
    }

    pub fn detector(mut self, detector: Arc<dyn LanguageDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    pub fn translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Compiles every disclosure reference of the catalog up front
    pub fn build(self) -> Result<ComplianceEngine, EngineError> {
        let models = self.models.unwrap_or_default();
        if !models.supports(&self.config.default_language) {
            warn!(
                "Default language '{}' has no registered model; baseline will be used",
                self.config.default_language
            );
        }

        let catalog = self
            .catalog
            .unwrap_or_else(|| Arc::new(frameworks::builtin_catalog().clone()));
        let references = catalog
            .frameworks
            .iter()
            .map(|(name, framework)| -> Result<_, EngineError> {
                Ok((name.clone(), matcher::compile_framework(framework)?))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(ComplianceEngine {
            catalog,
            references,
            models,
            detector: self.detector.unwrap_or_else(|| Arc::new(StopwordDetector)),
            translator: self.translator,
            config: self.config,
        })
    }
}
