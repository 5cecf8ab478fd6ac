//! Ordered name-scoring strategies shared by the artist and album calculators
//!
//! Each strategy is a pure function. They run in a fixed order and the first
//! one to produce a non-zero score decides both the score and the reason.

use crate::services::string_similarity::calculate_similarity;

/// Names being compared for one dimension (artist or album)
#[derive(Debug, Clone, Copy)]
pub struct NameEvidence<'a> {
    /// Name on the catalog side
    pub catalog: &'a str,
    /// Name read from the file's tags
    pub file: &'a str,
    /// Name guessed from the file's directory
    pub path: Option<&'a str>,
}

/// Weights and wording for one dimension
#[derive(Debug, Clone, Copy)]
pub struct NameWeights {
    pub exact_score: f64,
    pub exact_reason: &'static str,
    pub path_score: f64,
    pub path_reason: &'static str,
    /// Prefix of the similarity reason, e.g. "Artist similarity"
    pub similarity_label: &'static str,
    /// Multiplier applied to similarity when it clears the threshold
    pub similarity_multiplier: f64,
    pub similarity_threshold: f64,
    /// Whether a similarity equal to the threshold still counts
    pub threshold_inclusive: bool,
}

pub type NameStrategy = fn(&NameEvidence<'_>, &NameWeights) -> Option<(f64, String)>;

/// Exact, then directory, then similarity
pub const NAME_STRATEGIES: [NameStrategy; 3] = [exact_match, path_match, similarity_match];

/// Run [`NAME_STRATEGIES`] in order, returning the first non-zero result
pub fn first_match(evidence: &NameEvidence<'_>, weights: &NameWeights) -> Option<(f64, String)> {
    NAME_STRATEGIES
        .iter()
        .filter_map(|strategy| strategy(evidence, weights))
        .find(|(score, _)| *score != 0.0)
}

fn exact_match(evidence: &NameEvidence<'_>, weights: &NameWeights) -> Option<(f64, String)> {
    eq_ignore_case(evidence.catalog, evidence.file)
        .then(|| (weights.exact_score, weights.exact_reason.to_string()))
}

fn path_match(evidence: &NameEvidence<'_>, weights: &NameWeights) -> Option<(f64, String)> {
    let path = evidence.path?;
    eq_ignore_case(evidence.catalog, path).then(|| (weights.path_score, weights.path_reason.to_string()))
}

fn similarity_match(evidence: &NameEvidence<'_>, weights: &NameWeights) -> Option<(f64, String)> {
    let similarity = calculate_similarity(evidence.catalog, evidence.file);

    let clears = if weights.threshold_inclusive {
        similarity >= weights.similarity_threshold
    } else {
        similarity > weights.similarity_threshold
    };

    clears.then(|| {
        (
            similarity * weights.similarity_multiplier,
            format!("{} ({:.2})", weights.similarity_label, similarity),
        )
    })
}

/// Trimmed, case-insensitive equality
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
