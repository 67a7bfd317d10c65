pub mod types;

pub use types::{
    AnalyticsSummary, ComplianceReport, ComplianceStat, Omission, ReportRow, StoredReport,
    Suggestion,
};
