//! Session context types and the store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::scoring::RoutingDecision;

/// One completed user/agent exchange. Append-only, immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationStep {
    pub timestamp: DateTime<Utc>,
    pub user_message: String,
    pub agent_id: String,
    pub agent_response: String,
    pub routing_reason: String,
}

/// Per-session conversation state. Owned exclusively by the
/// [`ContextStore`]; everything handed out is a clone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: String,
    /// Transient: the query currently being routed for this session.
    pub current_query: String,
    /// Bounded FIFO; oldest entries drop first.
    pub conversation_history: Vec<ConversationStep>,
    /// Bounded FIFO, always the same length as `conversation_history`.
    pub routing_decisions: Vec<RoutingDecision>,
    pub current_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn new(session_id: &str, current_query: &str) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.to_string(),
            current_query: current_query.to_string(),
            conversation_history: Vec::new(),
            routing_decisions: Vec::new(),
            current_agent: None,
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Append an exchange, evicting from the front once over `max_history`.
    pub fn push_exchange(
        &mut self,
        step: ConversationStep,
        decision: RoutingDecision,
        max_history: usize,
    ) {
        self.current_agent = Some(step.agent_id.clone());
        self.conversation_history.push(step);
        self.routing_decisions.push(decision);
        while self.conversation_history.len() > max_history {
            self.conversation_history.remove(0);
            self.routing_decisions.remove(0);
        }
        self.last_activity_at = Utc::now();
    }

    /// The continuity view handed to scoring and prompt building.
    pub fn snapshot(&self) -> ContextSnapshot {
        let recent_start = self.conversation_history.len().saturating_sub(3);
        ContextSnapshot {
            current_agent: self.current_agent.clone(),
            exchange_count: self.conversation_history.len(),
            dominant_intent: self.dominant_intent(),
            recent_exchanges: self.conversation_history[recent_start..].to_vec(),
        }
    }

    /// Mode of `analyzed_intent` across routing decisions.
    pub fn dominant_intent(&self) -> Option<String> {
        mode(self.routing_decisions.iter().map(|d| d.analyzed_intent.as_str()))
    }

    /// Derived, read-only statistics for this session.
    pub fn stats(&self) -> SessionStats {
        let agent_switches = self
            .conversation_history
            .windows(2)
            .filter(|pair| pair[0].agent_id != pair[1].agent_id)
            .count();

        SessionStats {
            session_id: self.session_id.clone(),
            message_count: self.conversation_history.len(),
            agent_switches,
            most_frequent_agent: mode(
                self.conversation_history.iter().map(|s| s.agent_id.as_str()),
            ),
            dominant_intent: self.dominant_intent(),
            current_agent: self.current_agent.clone(),
            duration_seconds: (self.last_activity_at - self.created_at).num_seconds(),
        }
    }
}

/// Most frequent item; earlier first-occurrence wins ties.
fn mode<'a>(items: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for item in items {
        let count = counts.entry(item).or_insert(0);
        if *count == 0 {
            order.push(item);
        }
        *count += 1;
    }
    order
        .into_iter()
        .max_by_key(|item| counts[item])
        .map(|item| item.to_string())
}

/// Continuity signal derived from a session. Always present: an empty
/// snapshot means "no prior context", avoiding optional-context plumbing.
#[derive(Debug, Clone, Default)]
pub struct ContextSnapshot {
    pub current_agent: Option<String>,
    pub exchange_count: usize,
    pub dominant_intent: Option<String>,
    /// Up to the last three exchanges, oldest first.
    pub recent_exchanges: Vec<ConversationStep>,
}

/// Derived session statistics. Served verbatim by the gateway, so field
/// names are part of the wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub session_id: String,
    pub message_count: usize,
    pub agent_switches: usize,
    pub most_frequent_agent: Option<String>,
    pub dominant_intent: Option<String>,
    pub current_agent: Option<String>,
    pub duration_seconds: i64,
}

/// Owns all session contexts and is their sole mutator. Mutations for one
/// session id are serialized; distinct sessions proceed concurrently.
#[async_trait]
pub trait ContextStore: Send + Sync {
    /// Return a clone of the session's context, creating it if absent, and
    /// record the query currently being routed.
    async fn get_or_create(&self, session_id: &str, current_query: &str) -> SessionContext;

    /// Append a completed exchange. Warns and does nothing if the session
    /// does not exist.
    async fn append_exchange(
        &self,
        session_id: &str,
        step: ConversationStep,
        decision: RoutingDecision,
    );

    /// Remove a session. Returns whether one existed.
    async fn clear(&self, session_id: &str) -> bool;

    /// Remove sessions idle longer than `max_idle`; returns how many.
    async fn sweep_expired(&self, max_idle: Duration) -> usize;

    /// Derived statistics for a session, if it exists.
    async fn stats(&self, session_id: &str) -> Option<SessionStats>;

    /// Number of live sessions.
    async fn active_count(&self) -> usize;

    /// The name of this store implementation.
    fn name(&self) -> &str;
}
