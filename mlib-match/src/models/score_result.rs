//! Aggregated output of a calculator chain

use serde::{Deserialize, Serialize};

/// Total score plus the reasons that produced it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Sum of calculator deltas (may be negative)
    pub score: f64,
    /// Non-empty reasons, in calculator execution order
    pub reasons: Vec<String>,
}

impl ScoreResult {
    /// Fold one calculator's contribution into the total
    pub fn add(&mut self, score: f64, reason: Option<String>) {
        self.score += score;
        if let Some(reason) = reason.filter(|r| !r.is_empty()) {
            self.reasons.push(reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_skips_empty_reasons() {
        let mut result = ScoreResult::default();
        result.add(30.0, Some("Artist match".to_string()));
        result.add(-5.0, None);
        result.add(0.0, Some(String::new()));

        assert_eq!(result.score, 25.0);
        assert_eq!(result.reasons, vec!["Artist match".to_string()]);
    }
}
