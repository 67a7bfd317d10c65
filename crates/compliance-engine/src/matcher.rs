//! Disclosure matching: addressed, mentioned or absent
//!
//! A disclosure is present when its id or title appears as a whole word
//! anywhere in the text. The first sentence (in document order) containing
//! the id or title as a case-insensitive substring decides between
//! "addressed" (an action lemma such as "report" or "disclose" is present)
//! and "mentioned". A sentence holding "2-10" therefore confirms "2-1".

use regex::Regex;

use crate::catalog::FrameworkCatalog;
use crate::language::{Sentence, TextAnalysis};
use crate::patterns::{whole_word_pattern, ACTION_LEMMAS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Addressed,
    Mentioned,
    Absent,
}

/// Compiled id/title reference for one disclosure or standard
#[derive(Debug, Clone)]
pub struct Reference {
    pattern: Regex,
    /// Lowercased, non-empty id and title
    needles: Vec<String>,
}

impl Reference {
    pub fn new(id: &str, title: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: whole_word_pattern(&[id, title])?,
            needles: [id, title]
                .iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }

    /// Whole-word presence anywhere in `text`
    pub fn is_found_in(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Case-insensitive substring presence in a sentence
    pub fn is_mentioned_in(&self, sentence: &str) -> bool {
        let sentence = sentence.to_lowercase();
        self.needles.iter().any(|needle| sentence.contains(needle.as_str()))
    }
}

/// References for every report row of a framework, in row order
pub fn compile_framework(framework: &FrameworkCatalog) -> Result<Vec<Reference>, regex::Error> {
    match framework {
        FrameworkCatalog::Grouped { groups } => groups
            .iter()
            .flat_map(|g| g.disclosures.iter())
            .map(|d| Reference::new(&d.id, &d.title))
            .collect(),
        FrameworkCatalog::Flat { standards } => standards
            .iter()
            .map(|s| Reference::new(&s.code, &s.title))
            .collect(),
    }
}

/// First sentence mentioning the reference, if any
pub fn find_confirming_sentence<'a>(
    reference: &Reference,
    analysis: &'a TextAnalysis,
) -> Option<&'a Sentence> {
    analysis
        .sentences
        .iter()
        .find(|sentence| reference.is_mentioned_in(&sentence.text))
}

/// Classify a disclosure against the document text and its sentence analysis
pub fn classify(text: &str, reference: &Reference, analysis: &TextAnalysis) -> Classification {
    if !reference.is_found_in(text) {
        return Classification::Absent;
    }

    match find_confirming_sentence(reference, analysis) {
        Some(sentence) if sentence.has_lemma_in(ACTION_LEMMAS) => Classification::Addressed,
        Some(_) => Classification::Mentioned,
        // Referenced in the text but lost by sentence segmentation
        None => Classification::Mentioned,
    }
}
