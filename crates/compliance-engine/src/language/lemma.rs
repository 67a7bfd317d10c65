//! Rule-based English lemmatizer
//!
//! Covers inflections of the verbs that matter for disclosure detection plus
//! a generic plural rule. Not a general-purpose morphological analyzer.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Verbs whose inflected forms are reduced to the base form
const VERB_LEXICON: &[&str] = &[
    "report", "include", "disclose", "provide", "describe", "publish", "present", "state",
    "assess", "manage", "monitor", "measure", "identify", "explain", "cover", "contain",
    "omit", "reduce", "engage",
];

lazy_static! {
    static ref IRREGULAR: HashMap<&'static str, &'static str> = [
        ("is", "be"),
        ("are", "be"),
        ("was", "be"),
        ("were", "be"),
        ("been", "be"),
        ("has", "have"),
        ("had", "have"),
        ("does", "do"),
        ("did", "do"),
        ("made", "make"),
        ("gave", "give"),
        ("given", "give"),
        ("this", "this"),
        ("its", "its"),
        ("us", "us"),
    ]
    .into_iter()
    .collect();
}

/// Reduce a word to its lemma (lowercased)
pub fn lemmatize(word: &str) -> String {
    let word = word.to_lowercase();

    if let Some(lemma) = IRREGULAR.get(word.as_str()) {
        return lemma.to_string();
    }

    if let Some(verb) = verb_candidates(&word)
        .into_iter()
        .find(|candidate| VERB_LEXICON.contains(&candidate.as_str()))
    {
        return verb;
    }

    plural_to_singular(&word)
}

fn verb_candidates(word: &str) -> Vec<String> {
    let mut candidates = vec![word.to_string()];
    for suffix in ["s", "es", "ed", "d", "ing"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            candidates.push(stem.to_string());
        }
    }
    // providing -> provide, disclosing -> disclose
    if let Some(stem) = word.strip_suffix("ing") {
        candidates.push(format!("{}e", stem));
    }
    candidates
}

fn plural_to_singular(word: &str) -> String {
    if word.chars().count() <= 3 {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{}y", stem);
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    word.strip_suffix('s').unwrap_or(word).to_string()
}
