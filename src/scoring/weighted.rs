//! Weighted multi-factor confidence scorer.

use std::collections::BTreeMap;

use super::traits::{RoutingDecision, Scorer, ScoringWeights};
use crate::analysis::QueryAnalysis;
use crate::context::ContextSnapshot;
use crate::specialists::{RegistryEntry, SpecialistRegistry};

/// Default scorer: saturating keyword overlap + capped domain hits +
/// continuity bonus + whole-word exact matches, capped overall.
pub struct WeightedScorer {
    weights: ScoringWeights,
}

impl WeightedScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Keyword overlap with diminishing returns past saturation.
    fn keyword_score(&self, analysis: &QueryAnalysis, entry: &RegistryEntry) -> f64 {
        let overlap = entry
            .profile
            .keywords
            .iter()
            .filter(|kw| analysis.matched_keywords.contains(&kw.to_lowercase()))
            .count() as f64;
        (overlap / self.weights.keyword_saturation).min(1.0)
    }

    /// Sum of per-domain capped indicator scores over declared domains.
    fn domain_score(&self, analysis: &QueryAnalysis, entry: &RegistryEntry) -> f64 {
        entry
            .profile
            .domains
            .iter()
            .map(|domain| {
                let hits = analysis.domain_hits.get(domain).copied().unwrap_or(0) as f64;
                (self.weights.domain_hit_weight * hits).min(self.weights.domain_cap)
            })
            .sum::<f64>()
            .min(1.0)
    }

    fn build_reasoning(
        ranked: &[(String, f64)],
        analysis: &QueryAnalysis,
        winner_threshold: f64,
        meets_threshold: bool,
        fallback_id: &str,
    ) -> String {
        let top: Vec<String> = ranked
            .iter()
            .take(3)
            .map(|(id, score)| format!("{id} ({score:.2})"))
            .collect();
        let top = top.join(", ");

        if meets_threshold {
            format!(
                "Routed to {}: intent '{}', {} keyword match(es), score {:.2} \
                 met threshold {:.2}. Top candidates: {}.",
                ranked[0].0,
                analysis.analyzed_intent,
                analysis.matched_keywords.len(),
                ranked[0].1,
                winner_threshold,
                top,
            )
        } else {
            format!(
                "No specialist met its confidence threshold (best: {} at {:.2}, \
                 needs {:.2}); falling back to {}. Top candidates: {}.",
                ranked[0].0, ranked[0].1, winner_threshold, fallback_id, top,
            )
        }
    }
}

impl Scorer for WeightedScorer {
    fn score(
        &self,
        analysis: &QueryAnalysis,
        entry: &RegistryEntry,
        context: &ContextSnapshot,
    ) -> f64 {
        let weights = &self.weights;

        let keyword_score = self.keyword_score(analysis, entry);
        let domain_score = self.domain_score(analysis, entry);
        let continuity = if context.current_agent.as_deref() == Some(entry.profile.id.as_str()) {
            weights.continuity_bonus
        } else {
            0.0
        };
        let exact_matches = entry.exact_keyword_matches(&analysis.original_query) as f64;

        let total = weights.keyword_weight * keyword_score
            + weights.domain_weight * domain_score
            + continuity
            + weights.exact_match_weight * exact_matches;

        total.clamp(0.0, weights.score_cap)
    }

    fn decide(
        &self,
        analysis: &QueryAnalysis,
        registry: &SpecialistRegistry,
        context: &ContextSnapshot,
    ) -> RoutingDecision {
        // Registry order first, then a stable sort: equal scores keep the
        // earlier-declared specialist in front.
        let mut ranked: Vec<(String, f64)> = registry
            .iter()
            .map(|entry| (entry.profile.id.clone(), self.score(analysis, entry, context)))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let confidence_scores: BTreeMap<String, f64> = ranked.iter().cloned().collect();

        let (winner_id, winner_score) = ranked[0].clone();
        let winner_threshold = registry
            .get(&winner_id)
            .map(|e| e.profile.confidence_threshold)
            .unwrap_or(1.0);
        let meets_threshold = winner_score >= winner_threshold;

        let selected_agent = if meets_threshold {
            winner_id
        } else {
            registry.fallback_id().to_string()
        };

        let reasoning = Self::build_reasoning(
            &ranked,
            analysis,
            winner_threshold,
            meets_threshold,
            registry.fallback_id(),
        );

        RoutingDecision {
            selected_agent,
            confidence_scores,
            reasoning,
            meets_threshold,
            analyzed_intent: analysis.analyzed_intent.clone(),
        }
    }

    fn name(&self) -> &str {
        "weighted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Analyzer, KeywordAnalyzer};
    use crate::specialists::{default_profiles, SpecialistProfile, SpecialistRegistry};
    use std::sync::Arc;

    fn registry() -> Arc<SpecialistRegistry> {
        Arc::new(
            SpecialistRegistry::from_profiles(default_profiles(), "general-assistant").unwrap(),
        )
    }

    fn analyze(query: &str) -> QueryAnalysis {
        KeywordAnalyzer::new(registry()).analyze(query, &[])
    }

    fn scorer() -> WeightedScorer {
        WeightedScorer::new(ScoringWeights::default())
    }

    #[test]
    fn scores_stay_within_bounds() {
        let registry = registry();
        let scorer = scorer();
        let snapshot = ContextSnapshot::default();

        let queries = [
            "",
            "hello",
            "docker kubernetes api server database code programming software debug deploy",
            "analyze data statistics machine learning model dataset regression analytics",
            "business strategy market roi revenue growth invest budget finance cost tax",
        ];
        for query in queries {
            let analysis = analyze(query);
            for entry in registry.iter() {
                let score = scorer.score(&analysis, entry, &snapshot);
                assert!(
                    (0.0..=1.2).contains(&score),
                    "score {score} out of range for '{query}' / {}",
                    entry.profile.id
                );
            }
        }
    }

    #[test]
    fn continuity_bonus_is_exactly_point_three() {
        let registry = registry();
        let scorer = scorer();
        let analysis = analyze("market growth");
        let entry = registry.get("business-analyst").unwrap();

        let without = scorer.score(&analysis, entry, &ContextSnapshot::default());
        let with = scorer.score(
            &analysis,
            entry,
            &ContextSnapshot {
                current_agent: Some("business-analyst".into()),
                ..ContextSnapshot::default()
            },
        );

        assert!((with - without - 0.3).abs() < 1e-9);
    }

    #[test]
    fn keyword_only_query_ranks_owner_first() {
        // Query built exclusively from technical keywords.
        let registry = registry();
        let analysis = analyze("debug the docker api server code");
        let decision = scorer().decide(&analysis, &registry, &ContextSnapshot::default());

        assert_eq!(decision.selected_agent, "technical-specialist");
        assert!(decision.meets_threshold);
    }

    #[test]
    fn dockerfile_query_routes_to_technical() {
        let registry = registry();
        let analysis =
            analyze("Write a Dockerfile for Node.js 20 with pnpm and multi-stage builds.");
        let decision = scorer().decide(&analysis, &registry, &ContextSnapshot::default());

        assert_eq!(decision.selected_agent, "technical-specialist");
        assert!(decision.meets_threshold);
        assert!(analysis.matched_keywords.contains("docker"));
    }

    #[test]
    fn weak_query_falls_back() {
        let registry = registry();
        let analysis = analyze("tell me something interesting");
        let decision = scorer().decide(&analysis, &registry, &ContextSnapshot::default());

        assert_eq!(decision.selected_agent, "general-assistant");
        assert!(!decision.meets_threshold);
        assert!(decision.reasoning.contains("threshold"));
        assert!(decision.reasoning.contains("general-assistant"));
    }

    #[test]
    fn confidence_scores_cover_every_specialist() {
        let registry = registry();
        let analysis = analyze("what about the business roi?");
        let decision = scorer().decide(&analysis, &registry, &ContextSnapshot::default());

        let ids: Vec<String> = registry.ids();
        assert_eq!(decision.confidence_scores.len(), ids.len());
        for id in ids {
            assert!(decision.confidence_scores.contains_key(&id));
        }
    }

    #[test]
    fn reasoning_names_top_three_descending() {
        let registry = registry();
        let analysis = analyze("deploy the code to the docker server");
        let decision = scorer().decide(&analysis, &registry, &ContextSnapshot::default());

        // The winner is named first in the candidate list.
        let top_pos = decision
            .reasoning
            .find("technical-specialist")
            .expect("winner named in reasoning");
        assert!(top_pos < decision.reasoning.len());
        // Three candidates are listed.
        assert!(decision.reasoning.matches('(').count() >= 3);
    }

    #[test]
    fn ties_break_toward_earlier_registration() {
        let twin = |id: &str| SpecialistProfile {
            id: id.into(),
            name: id.into(),
            description: "identical twin".into(),
            capabilities: vec![],
            keywords: vec!["twin".into()],
            domains: vec![],
            confidence_threshold: 0.1,
        };
        let registry =
            SpecialistRegistry::from_profiles(vec![twin("first"), twin("second")], "first")
                .unwrap();
        let analyzer = KeywordAnalyzer::new(Arc::new(
            SpecialistRegistry::from_profiles(vec![twin("first"), twin("second")], "first")
                .unwrap(),
        ));

        let analysis = analyzer.analyze("twin", &[]);
        let decision = scorer().decide(&analysis, &registry, &ContextSnapshot::default());
        assert_eq!(decision.selected_agent, "first");
    }

    #[test]
    fn continuity_flips_an_otherwise_tied_ranking() {
        let registry = registry();
        let scorer = scorer();
        let analysis = analyze("hello");
        let snapshot = ContextSnapshot {
            current_agent: Some("creative-specialist".into()),
            ..ContextSnapshot::default()
        };

        let decision = scorer.decide(&analysis, &registry, &snapshot);
        // Everyone scores ~0; the incumbent gets 0.3 and tops the ranking,
        // though 0.3 still misses its 0.5 threshold.
        let (top_id, top_score) = decision
            .confidence_scores
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(id, s)| (id.clone(), *s))
            .unwrap();
        assert_eq!(top_id, "creative-specialist");
        assert!((top_score - 0.3).abs() < 1e-9);
        assert_eq!(decision.selected_agent, "general-assistant");
    }
}
