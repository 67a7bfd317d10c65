//! Disclosure API Server
//!
//! REST endpoints for sustainability and financial disclosure compliance:
//! - Document upload (PDF, plain text, Markdown)
//! - Compliance analysis against a framework (GRI, IFRS)
//! - Analytics across all stored reports of a framework

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

mod error;
mod handlers;
mod models;
mod state;
mod storage;
mod translate;

use state::{AppState, Settings};

/// Largest accepted upload
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Command-line arguments for the disclosure API
#[derive(Parser, Debug)]
#[command(name = "disclosure-api")]
#[command(about = "Disclosure compliance analysis API")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3001")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// SQLite database URL for stored reports
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:disclosure.db?mode=rwc")]
    database_url: String,

    /// Directory holding uploaded documents
    #[arg(long, env = "DOCUMENTS_DIR", default_value = "documents")]
    documents_dir: PathBuf,

    /// JSON catalog replacing the built-in frameworks
    #[arg(long, env = "CATALOG_PATH")]
    catalog_path: Option<PathBuf>,

    /// LibreTranslate-compatible service; output is not translated when unset
    #[arg(long, env = "TRANSLATE_URL")]
    translate_url: Option<String>,

    /// Timeout for a single translation call in milliseconds
    #[arg(long, env = "TRANSLATE_TIMEOUT_MS", default_value = "5000")]
    translate_timeout_ms: u64,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            database_url: self.database_url.clone(),
            documents_dir: self.documents_dir.clone(),
            catalog_path: self.catalog_path.clone(),
            translate_url: self.translate_url.clone(),
            translate_timeout: Duration::from_millis(self.translate_timeout_ms),
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/frameworks", get(handlers::frameworks))
        .route("/upload", post(handlers::upload))
        .route("/analyze/:doc_id", get(handlers::analyze))
        .route("/analytics", get(handlers::analytics))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads env fallbacks
    dotenvy::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("disclosure_api=info".parse()?)
                .add_directive("compliance_engine=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    info!("Initializing disclosure API...");
    let state = Arc::new(AppState::new(&args.settings()).await?);
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Starting disclosure API on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
