//! Application state for the disclosure API

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use compliance_engine::service::ComplianceService;
use compliance_engine::{Catalog, ComplianceEngine};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::storage::{run_migrations, FsDocumentSource, SqliteReportStore};
use crate::translate::HttpTranslator;

/// Settings resolved from the command line and environment
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub documents_dir: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub translate_url: Option<String>,
    pub translate_timeout: Duration,
}

pub struct AppState {
    pub service: ComplianceService,
    pub documents: Arc<FsDocumentSource>,
}

impl AppState {
    pub async fn new(settings: &Settings) -> Result<Self> {
        tracing::info!("Connecting to database: {}", settings.database_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&settings.database_url)
            .await?;
        run_migrations(&pool).await?;

        let mut builder = ComplianceEngine::builder();

        if let Some(path) = &settings.catalog_path {
            let json = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading catalog {}", path.display()))?;
            let catalog = Catalog::from_json_str(&json)?;
            tracing::info!(
                "Loaded catalog {} ({} frameworks) from {}",
                catalog.version,
                catalog.frameworks.len(),
                path.display()
            );
            builder = builder.catalog(catalog);
        }

        match &settings.translate_url {
            Some(url) => {
                tracing::info!("Translating output through {}", url);
                builder = builder.translator(Arc::new(HttpTranslator::new(
                    url,
                    settings.translate_timeout,
                )?));
            }
            None => tracing::warn!("TRANSLATE_URL not set; output stays in the document language"),
        }

        Ok(Self::from_parts(
            builder.build()?,
            pool,
            settings.documents_dir.clone(),
        ))
    }

    pub fn from_parts(engine: ComplianceEngine, pool: SqlitePool, documents_dir: PathBuf) -> Self {
        let documents = Arc::new(FsDocumentSource::new(documents_dir));
        let service = ComplianceService::new(
            Arc::new(engine),
            Arc::new(SqliteReportStore::new(pool)),
            documents.clone(),
        );
        Self { service, documents }
    }
}
