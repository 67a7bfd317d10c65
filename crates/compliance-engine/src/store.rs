//! Persistence and document collaborators
//!
//! The engine never stores anything itself. Reports are appended through a
//! [`ReportStore`]; document text comes from a [`DocumentSource`] that owns
//! upload storage and text extraction.

use async_trait::async_trait;
use shared_types::StoredReport;
use tokio::sync::RwLock;

use crate::error::StoreError;

#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Append one report. Must be atomic per report.
    async fn save_report(&self, report: StoredReport) -> Result<(), StoreError>;

    /// All reports for a framework, in insertion order
    async fn load_reports(&self, compliance_type: &str) -> Result<Vec<StoredReport>, StoreError>;
}

#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Plain text of a previously uploaded document
    async fn load_text(&self, doc_id: &str) -> Result<String, StoreError>;
}

/// Append-only store held in memory
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    reports: RwLock<Vec<StoredReport>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.reports.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reports.read().await.is_empty()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn save_report(&self, report: StoredReport) -> Result<(), StoreError> {
        self.reports.write().await.push(report);
        Ok(())
    }

    async fn load_reports(&self, compliance_type: &str) -> Result<Vec<StoredReport>, StoreError> {
        Ok(self
            .reports
            .read()
            .await
            .iter()
            .filter(|r| r.compliance_type == compliance_type)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn report(compliance_type: &str) -> StoredReport {
        StoredReport {
            doc_id: "doc.txt".to_string(),
            compliance_type: compliance_type.to_string(),
            report: vec![],
            suggestions: vec![],
            language: "en".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_filters_by_framework() {
        let store = InMemoryReportStore::new();
        store.save_report(report("GRI")).await.unwrap();
        store.save_report(report("IFRS")).await.unwrap();
        store.save_report(report("GRI")).await.unwrap();

        assert_eq!(store.load_reports("GRI").await.unwrap().len(), 2);
        assert_eq!(store.load_reports("IFRS").await.unwrap().len(), 1);
        assert!(store.load_reports("SASB").await.unwrap().is_empty());
        assert_eq!(store.len().await, 3);
    }
}
