//! Router trait and the public routing result shapes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::RouteError;
use crate::context::SessionStats;

/// The routing explanation attached to every response. Serialized for API
/// consumers, so field names are part of the wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingAnalysis {
    pub original_query: String,
    pub analyzed_intent: String,
    /// One entry per registered specialist.
    pub confidence_scores: BTreeMap<String, f64>,
    pub selected_agent: String,
    pub reasoning: String,
    pub matched_keywords: Vec<String>,
}

/// Everything a caller gets back for one routed query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingResult {
    pub session_id: String,
    pub handling_agent_id: String,
    pub handling_agent_name: String,
    pub response_text: String,
    pub routing_analysis: RoutingAnalysis,
    /// False when the engine degraded to the canned fallback response and
    /// left the session history untouched.
    pub context_maintained: bool,
}

/// One specialist as reported by the status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialistSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub capabilities: Vec<String>,
    pub confidence_threshold: f64,
}

/// Engine-wide status snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterStatus {
    pub specialists: Vec<SpecialistSummary>,
    pub active_session_count: usize,
    pub fallback_specialist: String,
}

/// The routing engine surface the CLI and gateway share.
#[async_trait]
pub trait Router: Send + Sync {
    /// Start a fresh session and route the first message through it.
    async fn start_session(&self, message: &str) -> Result<RoutingResult, RouteError>;

    /// Route one message within an existing (or newly named) session.
    ///
    /// Only validation failures surface as errors; routing and invocation
    /// failures degrade into a fallback [`RoutingResult`].
    async fn query(&self, message: &str, session_id: &str) -> Result<RoutingResult, RouteError>;

    /// Registry and session overview.
    async fn status(&self) -> RouterStatus;

    /// Statistics for one session, if it exists.
    async fn session_stats(&self, session_id: &str) -> Option<SessionStats>;

    /// Drop a session. Returns whether one existed.
    async fn clear_session(&self, session_id: &str) -> bool;

    /// The name of this router implementation.
    fn name(&self) -> &str;
}
