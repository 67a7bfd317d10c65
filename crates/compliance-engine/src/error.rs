//! Error types for catalog loading, analysis and persistence

use thiserror::Error;

/// Errors surfaced to callers of the engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown framework: {0}")]
    UnknownFramework(String),

    #[error("Invalid disclosure pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Analysis task failed: {0}")]
    Task(String),
}

/// Catalog validation and loading errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Framework '{framework}' declares group '{group}' more than once")]
    DuplicateGroup { framework: String, group: String },

    #[error("Group '{group}' declares disclosure '{id}' more than once")]
    DuplicateDisclosure { group: String, id: String },

    #[error("Framework '{framework}' declares standard '{code}' more than once")]
    DuplicateStandard { framework: String, code: String },

    #[error("Weight {weight} for '{id}' is outside (0, 1]")]
    InvalidWeight { id: String, weight: f64 },

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of the persistence and document collaborators.
///
/// Opaque to the engine: no retries are attempted here.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Backend(String),
}
