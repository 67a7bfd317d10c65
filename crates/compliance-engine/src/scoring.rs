//! Scoring policy
//!
//! | Outcome                   | Score       | Suggestion |
//! |---------------------------|-------------|------------|
//! | addressed                 | 90 x weight | no         |
//! | mentioned                 | 50 x weight | no         |
//! | validly omitted           | 0           | no         |
//! | invalid user reason       | 0           | yes        |
//! | mandatory, absent         | 0           | yes        |
//! | optional, absent          | 0           | yes        |

use shared_types::Omission;

use crate::catalog::{DisclosureSpec, StandardSpec};
use crate::matcher::Classification;
use crate::omission::{OmissionReason, Resolution};

pub const ADDRESSED_POINTS: f64 = 90.0;
pub const MENTIONED_POINTS: f64 = 50.0;
/// Flat frameworks have no "mentioned" tier
pub const FLAT_PRESENT_POINTS: f64 = 100.0;

pub const REMARK_ADDRESSED: &str = "Disclosure addressed in the document.";
pub const REMARK_MENTIONED: &str = "Disclosure mentioned but not fully addressed.";
pub const REMARK_INVALID_OMISSION: &str =
    "Invalid or not permitted omission reason provided by user.";
pub const REMARK_MANDATORY_MISSING: &str = "Mandatory disclosure missing.";
pub const REMARK_NOT_FOUND: &str = "Disclosure not found in the document.";
pub const REMARK_STANDARD_ADDRESSED: &str = "Standard addressed in the document.";
pub const REMARK_STANDARD_NOT_FOUND: &str = "Standard not found.";

/// Score, remark and optional follow-ups for one disclosure (untranslated)
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub score: f64,
    pub remark: String,
    pub omission: Option<Omission>,
    pub suggestion: Option<String>,
}

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn score_disclosure(
    spec: &DisclosureSpec,
    classification: Classification,
    resolution: &Resolution,
) -> Scored {
    let requirement = spec.requirement();

    match resolution {
        Resolution::UserDeclared(reason) => omitted(
            *reason,
            format!("User specified '{}' as the reason for omission.", reason),
        ),
        Resolution::DocumentStated(reason) => omitted(
            *reason,
            format!("Organization stated '{}' as the reason for omission.", reason),
        ),
        Resolution::InvalidUserReason(_) => unscored(
            REMARK_INVALID_OMISSION,
            format!(
                "Provide a valid reason for omission for {} or include the disclosure.",
                requirement
            ),
        ),
        Resolution::NotOmitted => match classification {
            Classification::Addressed => weighted(ADDRESSED_POINTS, spec.weight, REMARK_ADDRESSED),
            Classification::Mentioned => weighted(MENTIONED_POINTS, spec.weight, REMARK_MENTIONED),
            Classification::Absent if spec.mandatory => unscored(
                REMARK_MANDATORY_MISSING,
                format!("Include {} as it is a mandatory disclosure.", requirement),
            ),
            Classification::Absent => unscored(
                REMARK_NOT_FOUND,
                format!("Consider reporting on {} to improve compliance.", requirement),
            ),
        },
    }
}

/// Flat standards are binary: present scores the full weight
pub fn score_standard(standard: &StandardSpec, present: bool) -> Scored {
    if present {
        weighted(FLAT_PRESENT_POINTS, standard.weight, REMARK_STANDARD_ADDRESSED)
    } else {
        Scored {
            score: 0.0,
            remark: REMARK_STANDARD_NOT_FOUND.to_string(),
            omission: None,
            suggestion: None,
        }
    }
}

fn weighted(points: f64, weight: f64, remark: &str) -> Scored {
    Scored {
        score: round2(points * weight),
        remark: remark.to_string(),
        omission: None,
        suggestion: None,
    }
}

fn omitted(reason: OmissionReason, explanation: String) -> Scored {
    Scored {
        score: 0.0,
        remark: format!("Disclosure omitted with reason: {}.", reason),
        omission: Some(Omission {
            reason: reason.as_str().to_string(),
            explanation,
        }),
        suggestion: None,
    }
}

fn unscored(remark: &str, suggestion: String) -> Scored {
    Scored {
        score: 0.0,
        remark: remark.to_string(),
        omission: None,
        suggestion: Some(suggestion),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn spec(weight: f64, mandatory: bool) -> DisclosureSpec {
        DisclosureSpec::new("302-3", "Energy intensity", weight, mandatory)
    }

    #[test]
    fn test_addressed_full_weight() {
        let scored = score_disclosure(&spec(1.0, true), Classification::Addressed, &Resolution::NotOmitted);
        assert_eq!(scored.score, 90.0);
        assert_eq!(scored.remark, REMARK_ADDRESSED);
        assert!(scored.suggestion.is_none());
    }

    #[test]
    fn test_mentioned_is_weighted_and_rounded() {
        let scored = score_disclosure(&spec(0.9, false), Classification::Mentioned, &Resolution::NotOmitted);
        assert_eq!(scored.score, 45.0);
        assert_eq!(scored.remark, REMARK_MENTIONED);
    }

    #[test]
    fn test_mandatory_missing() {
        let scored = score_disclosure(&spec(1.0, true), Classification::Absent, &Resolution::NotOmitted);
        assert_eq!(
            scored,
            Scored {
                score: 0.0,
                remark: REMARK_MANDATORY_MISSING.to_string(),
                omission: None,
                suggestion: Some(
                    "Include 302-3 Energy intensity as it is a mandatory disclosure.".to_string()
                ),
            }
        );
    }

    #[test]
    fn test_optional_not_found() {
        let scored = score_disclosure(&spec(0.9, false), Classification::Absent, &Resolution::NotOmitted);
        assert_eq!(scored.remark, REMARK_NOT_FOUND);
        assert_eq!(
            scored.suggestion.as_deref(),
            Some("Consider reporting on 302-3 Energy intensity to improve compliance.")
        );
    }

    #[test]
    fn test_user_declared_omission() {
        let resolution = Resolution::UserDeclared(OmissionReason::Confidential);
        let scored = score_disclosure(&spec(0.9, false), Classification::Addressed, &resolution);
        assert_eq!(scored.score, 0.0);
        assert_eq!(scored.remark, "Disclosure omitted with reason: confidential.");
        assert_eq!(
            scored.omission,
            Some(Omission {
                reason: "confidential".to_string(),
                explanation: "User specified 'confidential' as the reason for omission.".to_string(),
            })
        );
        assert!(scored.suggestion.is_none());
    }

    #[test]
    fn test_document_stated_omission() {
        let resolution = Resolution::DocumentStated(OmissionReason::InformationUnavailable);
        let scored = score_disclosure(&spec(0.9, false), Classification::Absent, &resolution);
        assert_eq!(
            scored.omission.unwrap().explanation,
            "Organization stated 'information unavailable' as the reason for omission."
        );
        assert!(scored.suggestion.is_none());
    }

    #[test]
    fn test_invalid_user_reason() {
        let resolution = Resolution::InvalidUserReason("budget".to_string());
        let scored = score_disclosure(&spec(1.0, true), Classification::Addressed, &resolution);
        assert_eq!(scored.score, 0.0);
        assert_eq!(scored.remark, REMARK_INVALID_OMISSION);
        assert!(scored.omission.is_none());
        assert_eq!(
            scored.suggestion.as_deref(),
            Some("Provide a valid reason for omission for 302-3 Energy intensity or include the disclosure.")
        );
    }

    #[test]
    fn test_flat_standard() {
        let standard = StandardSpec {
            code: "IFRS 16".to_string(),
            title: "Leases".to_string(),
            weight: 0.8,
        };
        assert_eq!(score_standard(&standard, true).score, 80.0);
        let missing = score_standard(&standard, false);
        assert_eq!(missing.score, 0.0);
        assert_eq!(missing.remark, REMARK_STANDARD_NOT_FOUND);
        assert!(missing.suggestion.is_none());
    }

    proptest! {
        #[test]
        fn addressed_and_mentioned_scale_with_weight(weight in 0.01f64..=1.0) {
            let addressed = score_disclosure(&spec(weight, false), Classification::Addressed, &Resolution::NotOmitted);
            let mentioned = score_disclosure(&spec(weight, false), Classification::Mentioned, &Resolution::NotOmitted);

            prop_assert_eq!(addressed.score, round2(90.0 * weight));
            prop_assert_eq!(mentioned.score, round2(50.0 * weight));
            prop_assert!(addressed.score >= 0.0 && addressed.score <= 90.0);
            prop_assert!(mentioned.score <= addressed.score);
        }

        #[test]
        fn absent_rows_always_score_zero_with_one_suggestion(weight in 0.01f64..=1.0, mandatory in any::<bool>()) {
            let scored = score_disclosure(&spec(weight, mandatory), Classification::Absent, &Resolution::NotOmitted);
            prop_assert_eq!(scored.score, 0.0);
            prop_assert!(scored.suggestion.is_some());
        }

        #[test]
        fn invalid_reasons_score_zero_regardless_of_flags(
            weight in 0.01f64..=1.0,
            mandatory in any::<bool>(),
            reason in "[a-z ]{1,20}",
        ) {
            let resolution = Resolution::InvalidUserReason(reason);
            let scored = score_disclosure(&spec(weight, mandatory), Classification::Addressed, &resolution);
            prop_assert_eq!(scored.score, 0.0);
            prop_assert_eq!(scored.remark.as_str(), REMARK_INVALID_OMISSION);
            prop_assert!(scored.suggestion.is_some());
        }
    }
}
