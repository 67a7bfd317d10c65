//! Request and row models for the disclosure API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

fn default_compliance_type() -> String {
    "GRI".to_string()
}

fn default_lang() -> String {
    compliance_engine::DEFAULT_LANGUAGE.to_string()
}

/// Query string of `GET /analyze/{doc_id}`
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeQuery {
    #[serde(default = "default_compliance_type")]
    pub compliance_type: String,
    /// JSON object mapping `"{standard}_{disclosure}"` to a reason
    pub omissions: Option<String>,
    #[serde(default = "default_lang")]
    pub lang: String,
}

/// Query string of `GET /analytics`
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(default = "default_compliance_type")]
    pub compliance_type: String,
    #[serde(default = "default_lang")]
    pub lang: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub doc_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelledResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworkInfo {
    pub name: String,
    pub kind: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworksResponse {
    pub version: String,
    pub frameworks: Vec<FrameworkInfo>,
}

/// Row of the `reports` table
#[derive(Debug, FromRow)]
pub struct DbReport {
    pub doc_id: String,
    pub compliance_type: String,
    pub report: String,
    pub suggestions: String,
    pub language: String,
    pub timestamp: DateTime<Utc>,
}
