//! Lexical patterns for disclosure detection

use regex::{Regex, RegexBuilder};

/// Lemmas that turn a sentence referencing a disclosure into an "addressed" one
pub const ACTION_LEMMAS: &[&str] = &["report", "include", "disclose", "provide"];

/// Build a case-insensitive pattern matching any of `literals` as whole words.
///
/// Word boundaries are only asserted on edges that are word characters, so a
/// title ending in ")" such as "Emissions of ozone-depleting substances (ODS)"
/// still matches when followed by whitespace.
pub fn whole_word_pattern(literals: &[&str]) -> Result<Regex, regex::Error> {
    let alternatives: Vec<String> = literals
        .iter()
        .filter(|literal| !literal.trim().is_empty())
        .map(|literal| bounded(literal.trim()))
        .collect();

    // An empty alternation would match everywhere
    let source = if alternatives.is_empty() {
        r"\b\B".to_string()
    } else {
        alternatives.join("|")
    };

    RegexBuilder::new(&source).case_insensitive(true).build()
}

fn bounded(literal: &str) -> String {
    let mut pattern = String::new();
    if literal.chars().next().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(literal));
    if literal.chars().last().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Take at most `max_chars` characters from the start of `text`
pub fn text_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
