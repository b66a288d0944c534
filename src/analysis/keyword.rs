//! Keyword/table-driven analyzer implementation.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use super::tables::{
    IntentDef, CONTINUITY_BONUS, DOMAINS, GENERAL_INQUIRY, INTENTS, MIN_INTENT_SCORE,
    POLITE_PHRASES, POLITE_PHRASE_BONUS, PRIMARY_WEIGHT, QUESTION_FORM_WEIGHT,
    QUESTION_MARK_BONUS, QUESTION_WORDS, QUESTION_WORD_BONUS, SECONDARY_WEIGHT,
};
use super::traits::{Analyzer, QueryAnalysis};
use crate::specialists::SpecialistRegistry;

/// Analyzer backed by the registry keyword lists and the static tables in
/// [`super::tables`].
pub struct KeywordAnalyzer {
    registry: Arc<SpecialistRegistry>,
}

impl KeywordAnalyzer {
    pub fn new(registry: Arc<SpecialistRegistry>) -> Self {
        Self { registry }
    }

    fn matched_keywords(&self, lower: &str) -> BTreeSet<String> {
        let mut matched = BTreeSet::new();
        for entry in self.registry.iter() {
            for keyword in &entry.profile.keywords {
                if lower.contains(&keyword.to_lowercase()) {
                    matched.insert(keyword.to_lowercase());
                }
            }
        }
        matched
    }

    fn domain_hits(&self, lower: &str) -> BTreeMap<String, usize> {
        let mut hits: BTreeMap<String, usize> = BTreeMap::new();

        for domain in DOMAINS {
            let count = domain.terms.iter().filter(|t| lower.contains(*t)).count();
            if count > 0 {
                hits.insert(domain.tag.to_string(), count);
            }
        }

        // Semantic overlap: a query sharing at least two content words with a
        // specialist description indicates that specialist's domains.
        let query_words = content_words(lower);
        for entry in self.registry.iter() {
            let description_words = content_words(&entry.profile.description.to_lowercase());
            let shared = query_words.intersection(&description_words).count();
            if shared >= 2 {
                for domain in &entry.profile.domains {
                    *hits.entry(domain.clone()).or_insert(0) += 1;
                }
            }
        }

        hits
    }

    fn classify_intent(lower: &str, history: &[String]) -> String {
        let mut scores: Vec<(&'static str, f64)> = INTENTS
            .iter()
            .map(|intent| (intent.label, base_intent_score(intent, lower)))
            .collect();

        // Continuity: the previous turn's intent gets a head start.
        if let Some(previous) = history.last() {
            if let Some(previous_intent) = best_base_intent(&previous.to_lowercase()) {
                for (label, score) in &mut scores {
                    if *label == previous_intent {
                        *score += CONTINUITY_BONUS;
                    }
                }
            }
        }

        // Question-shaped queries push candidate intents over the minimum,
        // but only intents with table evidence benefit.
        let bonus = question_bonus(lower);
        if bonus > 0.0 {
            for (_, score) in &mut scores {
                if *score > 0.0 {
                    *score += bonus;
                }
            }
        }

        let mut best_label = GENERAL_INQUIRY;
        let mut best_score = 0.0_f64;
        for (label, score) in &scores {
            // Strict comparison: ties keep the earlier-declared intent.
            if *score > best_score {
                best_label = label;
                best_score = *score;
            }
        }

        if best_score < MIN_INTENT_SCORE {
            return GENERAL_INQUIRY.to_string();
        }
        best_label.to_string()
    }
}

impl Analyzer for KeywordAnalyzer {
    fn analyze(&self, query: &str, history: &[String]) -> QueryAnalysis {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return QueryAnalysis::empty(query);
        }

        let lower = trimmed.to_lowercase();
        let matched_keywords = self.matched_keywords(&lower);
        let domain_hits = self.domain_hits(&lower);
        let domain_indicators: BTreeSet<String> = domain_hits.keys().cloned().collect();
        let analyzed_intent = Self::classify_intent(&lower, history);

        QueryAnalysis {
            original_query: query.to_string(),
            analyzed_intent,
            matched_keywords,
            domain_indicators,
            domain_hits,
        }
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

/// Weighted tier score for one intent, before bonuses.
fn base_intent_score(intent: &IntentDef, lower: &str) -> f64 {
    let primary = intent.primary.iter().filter(|t| lower.contains(*t)).count() as f64;
    let secondary = intent.secondary.iter().filter(|t| lower.contains(*t)).count() as f64;
    let question_forms = intent
        .question_forms
        .iter()
        .filter(|t| lower.contains(*t))
        .count() as f64;

    (PRIMARY_WEIGHT * primary + SECONDARY_WEIGHT * secondary + QUESTION_FORM_WEIGHT * question_forms)
        * intent.multiplier
}

/// The intent a message would classify as on table evidence alone.
/// Used to derive the previous turn's intent for the continuity bonus.
fn best_base_intent(lower: &str) -> Option<&'static str> {
    let mut best: Option<(&'static str, f64)> = None;
    for intent in INTENTS {
        let score = base_intent_score(intent, lower);
        if score >= MIN_INTENT_SCORE && best.map_or(true, |(_, s)| score > s) {
            best = Some((intent.label, score));
        }
    }
    best.map(|(label, _)| label)
}

fn question_bonus(lower: &str) -> f64 {
    let mut bonus = 0.0;

    let has_question_word = lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| QUESTION_WORDS.contains(&word));
    if has_question_word {
        bonus += QUESTION_WORD_BONUS;
    }
    if lower.trim_end().ends_with('?') {
        bonus += QUESTION_MARK_BONUS;
    }
    if POLITE_PHRASES.iter().any(|p| lower.contains(p)) {
        bonus += POLITE_PHRASE_BONUS;
    }

    bonus
}

/// Words longer than three characters, lowercased, punctuation stripped.
fn content_words(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 3)
        .map(|w| w.to_lowercase())
        .collect()
}
