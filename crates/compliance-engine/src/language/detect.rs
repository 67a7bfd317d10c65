//! Baseline language detection by stopword frequency
//!
//! Good enough to route a report to one of the bundled languages; any
//! unknown or ambiguous sample yields [`DetectionError::NoSignal`] and the
//! caller falls back to the default language.

use unicode_segmentation::UnicodeSegmentation;

use super::{DetectionError, LanguageDetector};

const ENGLISH: &[&str] = &[
    "the", "and", "of", "to", "in", "is", "we", "our", "this", "that", "for", "with", "are",
    "on", "be", "as", "by", "it", "from", "which",
];

const SPANISH: &[&str] = &[
    "el", "los", "las", "y", "que", "del", "por", "para", "con", "una", "es", "su", "se",
    "al", "como", "más", "nuestra", "nuestro",
];

const FRENCH: &[&str] = &[
    "le", "les", "des", "et", "est", "une", "du", "que", "pour", "dans", "nous", "sur", "au",
    "aux", "qui", "avec", "notre", "sont",
];

/// Share of letters in the Arabic block above which a sample is Arabic
const ARABIC_SCRIPT_RATIO: f64 = 0.3;

#[derive(Debug, Clone, Copy, Default)]
pub struct StopwordDetector;

impl LanguageDetector for StopwordDetector {
    fn detect(&self, sample: &str) -> Result<String, DetectionError> {
        let letters = sample.chars().filter(|c| c.is_alphabetic()).count();
        if letters == 0 {
            return Err(DetectionError::NoSignal);
        }

        let arabic = sample
            .chars()
            .filter(|c| ('\u{0600}'..='\u{06FF}').contains(c))
            .count();
        if arabic as f64 / letters as f64 > ARABIC_SCRIPT_RATIO {
            return Ok("ar".to_string());
        }

        let words: Vec<String> = sample.unicode_words().map(str::to_lowercase).collect();
        let count = |stopwords: &[&str]| {
            words
                .iter()
                .filter(|w| stopwords.contains(&w.as_str()))
                .count()
        };

        // Ties resolve in list order
        let scores = [
            ("en", count(ENGLISH)),
            ("es", count(SPANISH)),
            ("fr", count(FRENCH)),
        ];
        let (language, best) = scores
            .iter()
            .fold(("", 0), |acc, &(lang, score)| if score > acc.1 { (lang, score) } else { acc });

        if best == 0 {
            Err(DetectionError::NoSignal)
        } else {
            Ok(language.to_string())
        }
    }
}
