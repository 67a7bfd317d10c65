//! HTTP handlers for the disclosure API

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use compliance_engine::{AnalysisOutcome, CancelToken, FrameworkCatalog};
use shared_types::AnalyticsSummary;

use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// List the frameworks of the loaded catalog
pub async fn frameworks(State(state): State<Arc<AppState>>) -> Json<FrameworksResponse> {
    let catalog = state.service.engine().catalog();
    let frameworks = catalog
        .frameworks
        .iter()
        .map(|(name, framework)| FrameworkInfo {
            name: name.clone(),
            kind: match framework {
                FrameworkCatalog::Grouped { .. } => "grouped",
                FrameworkCatalog::Flat { .. } => "flat",
            }
            .to_string(),
            rows: framework.row_count(),
        })
        .collect();

    Json(FrameworksResponse {
        version: catalog.version.clone(),
        frameworks,
    })
}

/// Store an uploaded document and return its id
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::InvalidRequest("File name is required".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to read upload: {}", e)))?;

        let doc_id = state.documents.save(&filename, &bytes).await?;
        return Ok(Json(UploadResponse { doc_id }));
    }

    Err(ApiError::InvalidRequest("Missing 'file' field".to_string()))
}

/// Raises the token when the request future is dropped before completion,
/// which is how axum reports a client disconnect
struct CancelOnDrop {
    token: CancelToken,
    armed: bool,
}

impl CancelOnDrop {
    fn new(token: CancelToken) -> Self {
        Self { token, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        if self.armed {
            tracing::info!("Client went away; cancelling analysis");
            self.token.cancel();
        }
    }
}

/// Analyze a stored document and persist the report
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Path(doc_id): Path<String>,
    Query(query): Query<AnalyzeQuery>,
) -> Result<Response, ApiError> {
    let user_omissions = parse_omissions(query.omissions.as_deref())?;
    let framework = query.compliance_type.to_uppercase();

    let cancel = CancelToken::new();
    let guard = CancelOnDrop::new(cancel.clone());

    let result = state
        .service
        .analyze(&doc_id, &framework, user_omissions, &query.lang, cancel)
        .await;
    guard.disarm();
    let outcome = result?;

    Ok(match outcome {
        AnalysisOutcome::Completed(analysis) => Json(analysis.report).into_response(),
        AnalysisOutcome::Cancelled => Json(CancelledResponse {
            message: "Analysis cancelled".to_string(),
        })
        .into_response(),
    })
}

/// Aggregated statistics for all stored reports of a framework
pub async fn analytics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsSummary>, ApiError> {
    let framework = query.compliance_type.to_uppercase();
    let summary = state.service.aggregate(&framework, &query.lang).await?;
    Ok(Json(summary))
}

/// Omissions arrive as a JSON object in the query string; empty means none
pub fn parse_omissions(raw: Option<&str>) -> Result<HashMap<String, String>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(HashMap::new()),
        Some(json) => serde_json::from_str(json)
            .map_err(|e| ApiError::InvalidRequest(format!("Invalid omissions JSON: {}", e))),
    }
}
