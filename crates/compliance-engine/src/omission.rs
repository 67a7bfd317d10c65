//! Omission rules
//!
//! A non-mandatory disclosure may be omitted for one of the permitted
//! reasons, either declared by the user for that disclosure or stated by the
//! organization somewhere in the document. Mandatory disclosures can never
//! be omitted.

use crate::catalog::DisclosureSpec;
use crate::matcher::Classification;

/// Permitted reasons for omitting a disclosure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OmissionReason {
    NotApplicable,
    Confidential,
    LegalProhibition,
    InformationUnavailable,
}

impl OmissionReason {
    /// Enumeration order is also the scan order for document-stated reasons
    pub const ALL: [OmissionReason; 4] = [
        OmissionReason::NotApplicable,
        OmissionReason::Confidential,
        OmissionReason::LegalProhibition,
        OmissionReason::InformationUnavailable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OmissionReason::NotApplicable => "not applicable",
            OmissionReason::Confidential => "confidential",
            OmissionReason::LegalProhibition => "legal prohibition",
            OmissionReason::InformationUnavailable => "information unavailable",
        }
    }

    /// Parse a user-supplied reason; only the exact canonical phrase is permitted
    pub fn parse(reason: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == reason)
    }
}

impl std::fmt::Display for OmissionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of omission resolution for one disclosure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No omission applies; the match classification stands
    NotOmitted,
    /// The user declared a permitted reason for a non-mandatory disclosure
    UserDeclared(OmissionReason),
    /// The document states a permitted reason and the disclosure is absent
    DocumentStated(OmissionReason),
    /// The user declared a reason that is not permitted here
    InvalidUserReason(String),
}

/// Decide whether `spec` is validly omitted.
///
/// A user-declared reason takes precedence over what the document says.
/// `lowered_text` must be the lowercased document text.
pub fn resolve(
    spec: &DisclosureSpec,
    classification: Classification,
    user_reason: Option<&str>,
    lowered_text: &str,
) -> Resolution {
    if let Some(raw) = user_reason.filter(|r| !r.is_empty()) {
        return match OmissionReason::parse(raw) {
            Some(reason) if !spec.mandatory => Resolution::UserDeclared(reason),
            _ => Resolution::InvalidUserReason(raw.to_string()),
        };
    }

    if classification != Classification::Absent || spec.mandatory {
        return Resolution::NotOmitted;
    }

    OmissionReason::ALL
        .into_iter()
        .find(|reason| lowered_text.contains(reason.as_str()))
        .map(Resolution::DocumentStated)
        .unwrap_or(Resolution::NotOmitted)
}
