//! Scorer trait, scoring weights, and the routing decision shape.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analysis::QueryAnalysis;
use crate::context::ContextSnapshot;
use crate::specialists::{RegistryEntry, SpecialistRegistry};

/// Scoring constants. The source implementations diverge on these, so they
/// are configuration (`[scoring]`) rather than hardcoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight of the saturating keyword-overlap score.
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: f64,
    /// Keyword matches at which the overlap score saturates.
    #[serde(default = "default_keyword_saturation")]
    pub keyword_saturation: f64,
    /// Weight of the per-domain indicator score.
    #[serde(default = "default_domain_weight")]
    pub domain_weight: f64,
    /// Score per indicator hit within one domain.
    #[serde(default = "default_domain_hit_weight")]
    pub domain_hit_weight: f64,
    /// Cap on a single domain's contribution.
    #[serde(default = "default_domain_cap")]
    pub domain_cap: f64,
    /// Flat bonus for the specialist currently handling the session.
    #[serde(default = "default_continuity_bonus")]
    pub continuity_bonus: f64,
    /// Additive weight per whole-word keyword match.
    #[serde(default = "default_exact_match_weight")]
    pub exact_match_weight: f64,
    /// Hard ceiling on the total score.
    #[serde(default = "default_score_cap")]
    pub score_cap: f64,
}

fn default_keyword_weight() -> f64 {
    0.6
}

fn default_keyword_saturation() -> f64 {
    3.0
}

fn default_domain_weight() -> f64 {
    0.2
}

fn default_domain_hit_weight() -> f64 {
    0.1
}

fn default_domain_cap() -> f64 {
    0.3
}

fn default_continuity_bonus() -> f64 {
    0.3
}

fn default_exact_match_weight() -> f64 {
    0.1
}

fn default_score_cap() -> f64 {
    1.2
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keyword_weight: default_keyword_weight(),
            keyword_saturation: default_keyword_saturation(),
            domain_weight: default_domain_weight(),
            domain_hit_weight: default_domain_hit_weight(),
            domain_cap: default_domain_cap(),
            continuity_bonus: default_continuity_bonus(),
            exact_match_weight: default_exact_match_weight(),
            score_cap: default_score_cap(),
        }
    }
}

/// The outcome of ranking every specialist for one query. Created once per
/// query and copied into the session's decision history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// A registered specialist id, or the fallback id. Never empty.
    pub selected_agent: String,
    /// One entry per registered specialist at decision time.
    pub confidence_scores: BTreeMap<String, f64>,
    /// Human-readable justification naming the top candidates.
    pub reasoning: String,
    /// Whether the winner cleared its own confidence threshold.
    pub meets_threshold: bool,
    /// Intent copied from the analysis, for session statistics.
    pub analyzed_intent: String,
}

/// Produces bounded confidence scores and threshold-gated decisions.
pub trait Scorer: Send + Sync {
    /// Score one specialist for one analysis. Always within
    /// `[0, score_cap]`.
    fn score(
        &self,
        analysis: &QueryAnalysis,
        entry: &RegistryEntry,
        context: &ContextSnapshot,
    ) -> f64;

    /// Rank every registered specialist and apply the threshold gate.
    fn decide(
        &self,
        analysis: &QueryAnalysis,
        registry: &SpecialistRegistry,
        context: &ContextSnapshot,
    ) -> RoutingDecision;

    /// The name of this scorer implementation.
    fn name(&self) -> &str;
}
