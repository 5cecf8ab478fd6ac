//! Edit-distance string similarity
//!
//! All comparisons trim and lowercase both sides first. Lengths are counted
//! in chars, so accented names are not penalised for their UTF-8 width.

use serde::{Deserialize, Serialize};

/// Default threshold for [`is_similar_default`]
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Punctuation ignored by [`calculate_normalized_similarity`]
const IGNORED_PUNCTUATION: [char; 7] = ['(', ')', '[', ']', '&', '-', '!'];

/// Winner of [`find_best_match`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestMatch {
    pub matched: String,
    pub score: f64,
}

/// Similarity in `[0, 1]`: `1 - levenshtein / max_len`
///
/// Two empty strings are identical (1.0); exactly one empty string shares
/// nothing with the other (0.0).
pub fn calculate_similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    let distance = strsim::levenshtein(&a, &b);

    1.0 - distance as f64 / max_len as f64
}

/// Map typographic single quotes (U+2019, U+2018) to ASCII `'`
pub fn normalize_apostrophes(value: Option<&str>) -> Option<String> {
    value.map(|s| s.replace(['\u{2019}', '\u{2018}'], "'"))
}

/// Similarity after removing `( ) [ ] & - !` and collapsing whitespace
pub fn calculate_normalized_similarity(a: &str, b: &str) -> f64 {
    calculate_similarity(&strip_punctuation(a), &strip_punctuation(b))
}

fn strip_punctuation(value: &str) -> String {
    let stripped: String = value
        .chars()
        .filter(|c| !IGNORED_PUNCTUATION.contains(c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn is_similar(a: &str, b: &str, threshold: f64) -> bool {
    calculate_similarity(a, b) >= threshold
}

pub fn is_similar_default(a: &str, b: &str) -> bool {
    is_similar(a, b, DEFAULT_SIMILARITY_THRESHOLD)
}

/// Most similar candidate to `target`
///
/// A later candidate must score strictly higher to replace the current
/// best, so ties keep the first occurrence.
pub fn find_best_match<S: AsRef<str>>(target: &str, candidates: &[S]) -> Option<BestMatch> {
    let mut best: Option<BestMatch> = None;

    for candidate in candidates {
        let candidate = candidate.as_ref();
        let score = calculate_similarity(target, candidate);
        match &best {
            Some(current) if score <= current.score => {}
            _ => {
                best = Some(BestMatch {
                    matched: candidate.to_string(),
                    score,
                })
            }
        }
    }

    best
}
