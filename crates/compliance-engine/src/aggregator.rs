//! Analytics over stored reports
//!
//! Rows are grouped by standard name across every stored report of a
//! framework. Groups appear in first-seen order; a group only exists once a
//! row has been counted for it, so averages never divide by zero.

use std::collections::HashMap;

use shared_types::{AnalyticsSummary, ComplianceStat, StoredReport, Suggestion};
use tracing::debug;

use crate::scoring::round2;
use crate::translation::{translate_or_passthrough, Translator};

#[derive(Debug, Clone, PartialEq)]
struct Tally {
    standard: String,
    total_score: f64,
    count: usize,
}

/// Roll stored reports up into per-standard averages and localized suggestions
pub fn aggregate(
    reports: &[StoredReport],
    output_lang: &str,
    translator: &dyn Translator,
) -> AnalyticsSummary {
    let mut tallies: Vec<Tally> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in reports.iter().flat_map(|r| r.report.iter()) {
        let slot = *index.entry(row.standard.clone()).or_insert_with(|| {
            tallies.push(Tally {
                standard: row.standard.clone(),
                total_score: 0.0,
                count: 0,
            });
            tallies.len() - 1
        });
        tallies[slot].total_score += row.compliance_score;
        tallies[slot].count += 1;
    }

    let compliance_stats: Vec<ComplianceStat> = tallies
        .into_iter()
        .map(|t| ComplianceStat {
            standard: t.standard,
            avg_score: round2(t.total_score / t.count as f64),
            total_reports: t.count,
        })
        .collect();

    let ai_suggestions: Vec<Suggestion> = reports
        .iter()
        .flat_map(|report| {
            report.suggestions.iter().map(move |s| Suggestion {
                standard: translate_or_passthrough(translator, &s.standard, &report.language, output_lang),
                suggestion: translate_or_passthrough(translator, &s.suggestion, &report.language, output_lang),
            })
        })
        .collect();

    debug!(
        "Aggregated {} reports into {} standards and {} suggestions",
        reports.len(),
        compliance_stats.len(),
        ai_suggestions.len()
    );

    AnalyticsSummary {
        compliance_stats,
        ai_suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::testing::{FailingTranslator, TaggingTranslator};
    use crate::translation::PassthroughTranslator;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use shared_types::ReportRow;

    fn row(standard: &str, score: f64) -> ReportRow {
        ReportRow {
            standard: standard.to_string(),
            requirement: format!("{} requirement", standard),
            compliance_score: score,
            remarks: String::new(),
            omission: None,
            sector_ref: None,
        }
    }

    fn stored(rows: Vec<ReportRow>, suggestions: Vec<Suggestion>, language: &str) -> StoredReport {
        StoredReport {
            doc_id: "doc.pdf".to_string(),
            compliance_type: "GRI".to_string(),
            report: rows,
            suggestions,
            language: language.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_no_reports_yields_empty_summary() {
        let summary = aggregate(&[], "en", &PassthroughTranslator);
        assert_eq!(summary, AnalyticsSummary::default());
    }

    #[test]
    fn test_averages_per_standard_across_reports() {
        let reports = vec![
            stored(vec![row("GRI 2", 90.0), row("GRI 3", 0.0), row("GRI 2", 45.0)], vec![], "en"),
            stored(vec![row("GRI 2", 0.0), row("GRI 3", 50.0)], vec![], "en"),
        ];

        let summary = aggregate(&reports, "en", &PassthroughTranslator);

        assert_eq!(
            summary.compliance_stats,
            vec![
                ComplianceStat {
                    standard: "GRI 2".to_string(),
                    avg_score: 45.0,
                    total_reports: 3,
                },
                ComplianceStat {
                    standard: "GRI 3".to_string(),
                    avg_score: 25.0,
                    total_reports: 2,
                },
            ]
        );
    }

    #[test]
    fn test_average_is_rounded() {
        let reports = vec![stored(vec![row("A", 10.0), row("A", 10.0), row("A", 0.0)], vec![], "en")];
        let summary = aggregate(&reports, "en", &PassthroughTranslator);
        assert_eq!(summary.compliance_stats[0].avg_score, 6.67);
    }

    #[test]
    fn test_suggestions_translated_from_report_language() {
        let suggestion = Suggestion {
            standard: "GRI 2".to_string(),
            suggestion: "Include 2-1".to_string(),
        };
        let reports = vec![
            stored(vec![], vec![suggestion.clone()], "en"),
            stored(vec![], vec![suggestion.clone()], "fr"),
        ];
        let translator = TaggingTranslator::default();

        let summary = aggregate(&reports, "fr", &translator);

        assert_eq!(summary.ai_suggestions[0].suggestion, "[fr] Include 2-1");
        assert_eq!(summary.ai_suggestions[0].standard, "[fr] GRI 2");
        // Already in French: left alone
        assert_eq!(summary.ai_suggestions[1], suggestion);
    }

    #[test]
    fn test_failed_translation_keeps_suggestions() {
        let suggestion = Suggestion {
            standard: "GRI 2".to_string(),
            suggestion: "Include 2-1".to_string(),
        };
        let reports = vec![stored(vec![], vec![suggestion.clone()], "en")];
        let summary = aggregate(&reports, "es", &FailingTranslator);
        assert_eq!(summary.ai_suggestions, vec![suggestion]);
    }

    proptest! {
        #[test]
        fn average_is_the_rounded_mean(scores in prop::collection::vec(0.0f64..=100.0, 1..40)) {
            let rows: Vec<ReportRow> = scores.iter().map(|&s| row("GRI 305", s)).collect();
            let summary = aggregate(&[stored(rows, vec![], "en")], "en", &PassthroughTranslator);

            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            prop_assert_eq!(summary.compliance_stats.len(), 1);
            prop_assert_eq!(summary.compliance_stats[0].avg_score, round2(mean));
            prop_assert_eq!(summary.compliance_stats[0].total_reports, scores.len());
        }
    }
}
