//! Analyzer trait and the per-request analysis result.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::tables::GENERAL_INQUIRY;

/// Everything the analyzer extracted from one query. Immutable once produced;
/// lives for the duration of the request unless copied into a decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub original_query: String,
    /// One of the fixed intent labels, or `general_inquiry`.
    pub analyzed_intent: String,
    /// Union of every registered specialist keyword found in the query
    /// (case-insensitive substring), shared across all scoring.
    pub matched_keywords: BTreeSet<String>,
    /// Domain tags with at least one indicator hit.
    pub domain_indicators: BTreeSet<String>,
    /// Indicator hit counts per domain tag; key set equals `domain_indicators`.
    pub domain_hits: BTreeMap<String, usize>,
}

impl QueryAnalysis {
    /// The worst-case analysis: nothing matched, general inquiry.
    pub fn empty(query: &str) -> Self {
        Self {
            original_query: query.to_string(),
            analyzed_intent: GENERAL_INQUIRY.to_string(),
            matched_keywords: BTreeSet::new(),
            domain_indicators: BTreeSet::new(),
            domain_hits: BTreeMap::new(),
        }
    }
}

/// Extracts keywords, intent, and domain indicators from raw query text.
/// Never fails; the worst case is an empty analysis.
pub trait Analyzer: Send + Sync {
    /// Analyze a query given the prior user messages of its session
    /// (oldest first).
    fn analyze(&self, query: &str, history: &[String]) -> QueryAnalysis;

    /// The name of this analyzer implementation.
    fn name(&self) -> &str;
}
