use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded omission: why a disclosure is not addressed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Omission {
    pub reason: String,
    pub explanation: String,
}

/// One scored disclosure (or flat standard) in a compliance report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "Standard")]
    pub standard: String, // Group name, e.g. "GRI 2: General Disclosures 2021"
    #[serde(rename = "Requirement")]
    pub requirement: String, // "2-1 Organizational details"
    #[serde(rename = "Compliance Score")]
    pub compliance_score: f64,
    #[serde(rename = "Remarks")]
    pub remarks: String,
    #[serde(rename = "Omission")]
    pub omission: Option<Omission>,
    #[serde(rename = "Sector Ref")]
    pub sector_ref: Option<String>,
}

/// Improvement suggestion attached to a standard group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub standard: String,
    pub suggestion: String,
}

/// Output of one analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub report: Vec<ReportRow>,
    pub suggestions: Vec<Suggestion>,
}

/// A persisted analysis result. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReport {
    pub doc_id: String,
    pub compliance_type: String,
    pub report: Vec<ReportRow>,
    pub suggestions: Vec<Suggestion>,
    /// Language the remarks and suggestions were rendered in
    pub language: String,
    pub timestamp: DateTime<Utc>,
}

/// Average score of one standard group across stored reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceStat {
    pub standard: String,
    #[serde(rename = "avgScore")]
    pub avg_score: f64,
    #[serde(rename = "totalReports")]
    pub total_reports: usize,
}

/// Catalog-wide analytics for one framework
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(rename = "complianceStats")]
    pub compliance_stats: Vec<ComplianceStat>,
    #[serde(rename = "aiSuggestions")]
    pub ai_suggestions: Vec<Suggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_row_uses_display_field_names() {
        let row = ReportRow {
            standard: "GRI 3: Material Topics 2021".to_string(),
            requirement: "3-1 Process to determine material topics".to_string(),
            compliance_score: 90.0,
            remarks: "Disclosure addressed in the document.".to_string(),
            omission: None,
            sector_ref: None,
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["Standard"], "GRI 3: Material Topics 2021");
        assert_eq!(json["Compliance Score"], 90.0);
        assert!(json["Omission"].is_null());
        assert!(json["Sector Ref"].is_null());

        let back: ReportRow = serde_json::from_value(json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn test_analytics_summary_uses_camel_case() {
        let summary = AnalyticsSummary {
            compliance_stats: vec![ComplianceStat {
                standard: "IFRS 9".to_string(),
                avg_score: 45.0,
                total_reports: 2,
            }],
            ai_suggestions: vec![],
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["complianceStats"][0]["avgScore"], 45.0);
        assert_eq!(json["complianceStats"][0]["totalReports"], 2);
        assert!(json["aiSuggestions"].as_array().unwrap().is_empty());
    }
}
