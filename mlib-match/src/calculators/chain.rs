//! Calculator chain: runs every registered calculator and sums the result
//!
//! Execution follows registration order. Priority is metadata only; no
//! calculator short-circuits another.

use super::{CalculatorType, ScoreCalculator};
use crate::config::MatchConfig;
use crate::models::{PathInfo, ScoreResult, Track, UnmatchedTrack};

/// Ordered set of score calculators
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCalculatorChain {
    calculators: Vec<ScoreCalculator>,
}

impl ScoreCalculatorChain {
    /// Chain over an explicit calculator list
    pub fn new(calculators: Vec<ScoreCalculator>) -> Self {
        Self { calculators }
    }

    /// Default calculator set configured from a snapshot
    pub fn from_config(config: &MatchConfig) -> Self {
        Self::new(ScoreCalculator::defaults(config))
    }

    pub fn calculators(&self) -> &[ScoreCalculator] {
        &self.calculators
    }

    /// Run every calculator, summing scores and collecting reasons
    pub fn execute_chain(&self, track: &Track, unmatched: &UnmatchedTrack, path_info: &PathInfo) -> ScoreResult {
        self.run(self.calculators.iter(), track, unmatched, path_info)
    }

    /// Like [`Self::execute_chain`], restricted to the allowed types
    ///
    /// An empty intersection yields a zero score and no reasons.
    pub fn execute_chain_with_types(
        &self,
        track: &Track,
        unmatched: &UnmatchedTrack,
        path_info: &PathInfo,
        allowed: &[CalculatorType],
    ) -> ScoreResult {
        let selected = self
            .calculators
            .iter()
            .filter(|c| allowed.contains(&c.calculator_type()));
        self.run(selected, track, unmatched, path_info)
    }

    /// Registered type tags, de-duplicated, in first-occurrence order
    pub fn available_types(&self) -> Vec<CalculatorType> {
        let mut types: Vec<CalculatorType> = Vec::with_capacity(self.calculators.len());
        for calculator in &self.calculators {
            let calculator_type = calculator.calculator_type();
            if !types.contains(&calculator_type) {
                types.push(calculator_type);
            }
        }
        types
    }

    /// First calculator registered under `tag` (exact, case-sensitive)
    pub fn calculator_by_type(&self, tag: &str) -> Option<&ScoreCalculator> {
        self.calculators
            .iter()
            .find(|c| c.calculator_type().as_str() == tag)
    }

    fn run<'a>(
        &self,
        calculators: impl Iterator<Item = &'a ScoreCalculator>,
        track: &Track,
        unmatched: &UnmatchedTrack,
        path_info: &PathInfo,
    ) -> ScoreResult {
        let mut result = ScoreResult::default();

        for calculator in calculators {
            let (score, reason) = calculator.evaluate(track, unmatched, path_info);
            tracing::trace!(
                calculator = %calculator.calculator_type(),
                score,
                reason = ?reason,
                "Calculator contribution"
            );
            result.add(score, reason);
        }

        tracing::debug!(
            track_id = %track.id,
            unmatched_id = %unmatched.id,
            score = result.score,
            reasons = result.reasons.len(),
            "Chain executed"
        );

        result
    }
}

impl Default for ScoreCalculatorChain {
    fn default() -> Self {
        Self::from_config(&MatchConfig::default())
    }
}
