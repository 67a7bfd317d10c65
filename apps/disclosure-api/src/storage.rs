//! SQLite report store and filesystem document source

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use compliance_engine::store::{DocumentSource, ReportStore};
use compliance_engine::StoreError;
use shared_types::StoredReport;
use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

use crate::models::DbReport;

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running database migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reports (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            doc_id TEXT NOT NULL,
            compliance_type TEXT NOT NULL,
            report TEXT NOT NULL,
            suggestions TEXT NOT NULL,
            language TEXT NOT NULL DEFAULT 'en',
            timestamp TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_reports_compliance_type ON reports(compliance_type)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Migrations complete");
    Ok(())
}

fn backend(e: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(e.to_string())
}

pub struct SqliteReportStore {
    pool: SqlitePool,
}

impl SqliteReportStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for SqliteReportStore {
    async fn save_report(&self, report: StoredReport) -> Result<(), StoreError> {
        let rows = serde_json::to_string(&report.report).map_err(backend)?;
        let suggestions = serde_json::to_string(&report.suggestions).map_err(backend)?;

        sqlx::query(
            r#"
            INSERT INTO reports (doc_id, compliance_type, report, suggestions, language, timestamp)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&report.doc_id)
        .bind(&report.compliance_type)
        .bind(&rows)
        .bind(&suggestions)
        .bind(&report.language)
        .bind(report.timestamp.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        tracing::info!("Stored {} report for {}", report.compliance_type, report.doc_id);
        Ok(())
    }

    async fn load_reports(&self, compliance_type: &str) -> Result<Vec<StoredReport>, StoreError> {
        let rows: Vec<DbReport> = sqlx::query_as(
            r#"
            SELECT doc_id, compliance_type, report, suggestions, language, timestamp
            FROM reports
            WHERE compliance_type = ?
            ORDER BY id
            "#,
        )
        .bind(compliance_type)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter()
            .map(|row| {
                Ok(StoredReport {
                    doc_id: row.doc_id,
                    compliance_type: row.compliance_type,
                    report: serde_json::from_str(&row.report).map_err(backend)?,
                    suggestions: serde_json::from_str(&row.suggestions).map_err(backend)?,
                    language: row.language,
                    timestamp: row.timestamp,
                })
            })
            .collect()
    }
}

/// Formats the document source can extract text from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    PlainText,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Result<Self, StoreError> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "txt" | "md" => Ok(DocumentFormat::PlainText),
            other => Err(StoreError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn of(name: &str) -> Result<Self, StoreError> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext)
    }
}

/// Extract plain text from document bytes
pub fn extract_text(format: DocumentFormat, bytes: &[u8]) -> Result<String, StoreError> {
    match format {
        DocumentFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| StoreError::Backend(format!("PDF extraction failed: {}", e))),
        DocumentFormat::PlainText => String::from_utf8(bytes.to_vec())
            .map_err(|e| StoreError::Backend(format!("Document is not valid UTF-8: {}", e))),
    }
}

/// Uploaded documents kept as files under one directory
pub struct FsDocumentSource {
    root: PathBuf,
}

impl FsDocumentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store an upload and return its generated document id
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> Result<String, StoreError> {
        DocumentFormat::of(filename)?;
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let doc_id = format!("{}.{}", Uuid::new_v4(), ext);
        tokio::fs::create_dir_all(&self.root).await.map_err(backend)?;
        tokio::fs::write(self.root.join(&doc_id), bytes)
            .await
            .map_err(backend)?;

        tracing::info!("Stored upload {} as {}", filename, doc_id);
        Ok(doc_id)
    }

    /// Ids are plain file names; anything that could leave the root is unknown
    fn path_for(&self, doc_id: &str) -> Result<PathBuf, StoreError> {
        let valid = !doc_id.is_empty()
            && !doc_id.contains(['/', '\\'])
            && doc_id != "."
            && doc_id != "..";
        if valid {
            Ok(self.root.join(doc_id))
        } else {
            Err(StoreError::DocumentNotFound(doc_id.to_string()))
        }
    }
}

#[async_trait]
impl DocumentSource for FsDocumentSource {
    async fn load_text(&self, doc_id: &str) -> Result<String, StoreError> {
        let path = self.path_for(doc_id)?;
        let format = DocumentFormat::of(doc_id)?;

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::DocumentNotFound(doc_id.to_string()))
            }
            Err(e) => return Err(backend(e)),
        };

        tokio::task::spawn_blocking(move || extract_text(format, &bytes))
            .await
            .map_err(backend)?
    }
}
