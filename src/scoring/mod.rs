//! Confidence scoring - ranks specialists for an analyzed query.

pub mod traits;
pub mod weighted;

pub use traits::{RoutingDecision, Scorer, ScoringWeights};
pub use weighted::WeightedScorer;

/// Create the default weighted scorer.
pub fn create_scorer(weights: ScoringWeights) -> Box<dyn Scorer> {
    Box::new(WeightedScorer::new(weights))
}
