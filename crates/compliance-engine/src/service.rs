//! Async compliance service
//!
//! Composes the engine with its collaborators: fetches document text,
//! runs the analysis on the blocking pool and appends the report. A run that
//! is cancelled before it finishes is never persisted.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use shared_types::{AnalyticsSummary, StoredReport};
use tracing::info;

use crate::store::{DocumentSource, ReportStore};
use crate::{AnalysisOutcome, CancelToken, ComplianceEngine, EngineError};

pub struct ComplianceService {
    engine: Arc<ComplianceEngine>,
    store: Arc<dyn ReportStore>,
    documents: Arc<dyn DocumentSource>,
}

impl ComplianceService {
    pub fn new(
        engine: Arc<ComplianceEngine>,
        store: Arc<dyn ReportStore>,
        documents: Arc<dyn DocumentSource>,
    ) -> Self {
        Self {
            engine,
            store,
            documents,
        }
    }

    pub fn engine(&self) -> &ComplianceEngine {
        &self.engine
    }

    /// Analyze a stored document and persist the report
    pub async fn analyze(
        &self,
        doc_id: &str,
        framework: &str,
        user_omissions: HashMap<String, String>,
        output_lang: &str,
        cancel: CancelToken,
    ) -> Result<AnalysisOutcome, EngineError> {
        if self.engine.catalog().framework(framework).is_none() {
            return Err(EngineError::UnknownFramework(framework.to_string()));
        }

        let text = self.documents.load_text(doc_id).await?;
        if cancel.is_cancelled() {
            info!("Analysis of {} cancelled before start", doc_id);
            return Ok(AnalysisOutcome::Cancelled);
        }

        let engine = self.engine.clone();
        let (framework_owned, lang_owned, token) =
            (framework.to_string(), output_lang.to_string(), cancel.clone());
        let outcome = tokio::task::spawn_blocking(move || {
            engine.analyze_text_cancellable(
                &text,
                &framework_owned,
                &user_omissions,
                &lang_owned,
                &token,
            )
        })
        .await
        .map_err(|e| EngineError::Task(e.to_string()))??;

        let analysis = match outcome {
            AnalysisOutcome::Completed(analysis) if !cancel.is_cancelled() => analysis,
            _ => {
                info!("Analysis of {} cancelled; nothing persisted", doc_id);
                return Ok(AnalysisOutcome::Cancelled);
            }
        };

        self.store
            .save_report(StoredReport {
                doc_id: doc_id.to_string(),
                compliance_type: framework.to_string(),
                report: analysis.report.report.clone(),
                suggestions: analysis.report.suggestions.clone(),
                language: analysis.language.clone(),
                timestamp: Utc::now(),
            })
            .await?;

        Ok(AnalysisOutcome::Completed(analysis))
    }

    /// Per-standard statistics across every stored report of `framework`
    pub async fn aggregate(
        &self,
        framework: &str,
        output_lang: &str,
    ) -> Result<AnalyticsSummary, EngineError> {
        let reports = self.store.load_reports(framework).await?;
        let count = reports.len();

        let engine = self.engine.clone();
        let lang = output_lang.to_string();
        let summary = tokio::task::spawn_blocking(move || engine.aggregate_reports(&reports, &lang))
            .await
            .map_err(|e| EngineError::Task(e.to_string()))?;

        info!(
            "Aggregated {} {} reports into {} standards",
            count,
            framework,
            summary.compliance_stats.len()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::InMemoryReportStore;
    use crate::{TranslationError, Translator};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticDocuments;

    #[async_trait]
    impl DocumentSource for StaticDocuments {
        async fn load_text(&self, doc_id: &str) -> Result<String, StoreError> {
            match doc_id {
                "report.txt" => Ok("2-1 Organizational details ... we report this information".to_string()),
                _ => Err(StoreError::DocumentNotFound(doc_id.to_string())),
            }
        }
    }

    fn service(store: Arc<InMemoryReportStore>) -> ComplianceService {
        ComplianceService::new(
            Arc::new(ComplianceEngine::new().unwrap()),
            store,
            Arc::new(StaticDocuments),
        )
    }

    /// Raises the token once `limit` translations have been requested
    struct CancellingTranslator {
        token: CancelToken,
        limit: usize,
        calls: AtomicUsize,
    }

    impl Translator for CancellingTranslator {
        fn translate(&self, text: &str, _: &str, _: &str) -> Result<String, TranslationError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) + 1 >= self.limit {
                self.token.cancel();
            }
            Ok(text.to_string())
        }
    }

    #[tokio::test]
    async fn test_analyze_persists_report() {
        let store = Arc::new(InMemoryReportStore::new());
        let service = service(store.clone());

        let outcome = service
            .analyze("report.txt", "GRI", HashMap::new(), "en", CancelToken::new())
            .await
            .unwrap();
        assert!(matches!(outcome, AnalysisOutcome::Completed(ref a) if a.report.report.len() == 77));

        let stored = store.load_reports("GRI").await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].doc_id, "report.txt");
        assert_eq!(stored[0].language, "en");
    }

    #[tokio::test]
    async fn test_cancelled_analysis_is_not_persisted() {
        let store = Arc::new(InMemoryReportStore::new());
        let service = service(store.clone());
        let cancel = CancelToken::new();
        cancel.cancel();

        let outcome = service
            .analyze("report.txt", "GRI", HashMap::new(), "en", cancel)
            .await
            .unwrap();
        assert_eq!(outcome, AnalysisOutcome::Cancelled);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_cancelled_mid_analysis_is_not_persisted() {
        let cancel = CancelToken::new();
        let engine = ComplianceEngine::builder()
            .translator(Arc::new(CancellingTranslator {
                token: cancel.clone(),
                limit: 3,
                calls: AtomicUsize::new(0),
            }))
            .build()
            .unwrap();
        let store = Arc::new(InMemoryReportStore::new());
        let service = ComplianceService::new(Arc::new(engine), store.clone(), Arc::new(StaticDocuments));

        let outcome = service
            .analyze("report.txt", "GRI", HashMap::new(), "fr", cancel)
            .await
            .unwrap();
        assert_eq!(outcome, AnalysisOutcome::Cancelled);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_stored_language_follows_translation_outcome() {
        let store = Arc::new(InMemoryReportStore::new());
        let service = service(store.clone());

        // No translator is configured, so French output stays in English
        service
            .analyze("report.txt", "GRI", HashMap::new(), "fr", CancelToken::new())
            .await
            .unwrap();
        service
            .analyze("report.txt", "GRI", HashMap::new(), "en", CancelToken::new())
            .await
            .unwrap();

        let languages: Vec<String> = store
            .load_reports("GRI")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.language)
            .collect();
        assert_eq!(languages, vec!["en", "en"]);
    }

    #[tokio::test]
    async fn test_missing_document() {
        let service = service(Arc::new(InMemoryReportStore::new()));
        let err = service
            .analyze("missing.pdf", "GRI", HashMap::new(), "en", CancelToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Store(StoreError::DocumentNotFound(_))));
    }

    #[tokio::test]
    async fn test_unknown_framework_checked_before_loading() {
        let service = service(Arc::new(InMemoryReportStore::new()));
        let err = service
            .analyze("missing.pdf", "SASB", HashMap::new(), "en", CancelToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownFramework(_)));
    }

    #[tokio::test]
    async fn test_aggregate_empty_store() {
        let service = service(Arc::new(InMemoryReportStore::new()));
        let summary = service.aggregate("GRI", "en").await.unwrap();
        assert!(summary.compliance_stats.is_empty());
        assert!(summary.ai_suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_aggregate_after_analysis() {
        let store = Arc::new(InMemoryReportStore::new());
        let service = service(store);
        for _ in 0..2 {
            service
                .analyze("report.txt", "GRI", HashMap::new(), "en", CancelToken::new())
                .await
                .unwrap();
        }

        let summary = service.aggregate("GRI", "en").await.unwrap();
        let general = &summary.compliance_stats[0];
        assert_eq!(general.standard, "GRI 2: General Disclosures 2021");
        assert_eq!(general.total_reports, 60);
    }
}
