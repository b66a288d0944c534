//! In-memory context store implementation.
//!
//! Layout: an outer read/write lock over the session map, with each session
//! behind its own async mutex. The outer lock is only held to look up or
//! insert map entries (never across an await); the per-session mutex
//! serializes read-modify-append sequences and shields entries from the
//! expiry sweep mid-update.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::traits::{ContextStore, ConversationStep, SessionContext, SessionStats};
use crate::scoring::RoutingDecision;

type SessionSlot = Arc<Mutex<SessionContext>>;

/// Mutex-per-session in-memory store.
pub struct InMemoryContextStore {
    sessions: RwLock<HashMap<String, SessionSlot>>,
    max_history: usize,
}

impl InMemoryContextStore {
    pub fn new(max_history: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_history: max_history.max(1),
        }
    }

    fn slot(&self, session_id: &str) -> Option<SessionSlot> {
        self.sessions.read().get(session_id).cloned()
    }

    #[cfg(test)]
    pub(crate) async fn backdate(&self, session_id: &str, idle_for: Duration) {
        if let Some(slot) = self.slot(session_id) {
            let mut session = slot.lock().await;
            session.last_activity_at =
                Utc::now() - chrono::Duration::from_std(idle_for).unwrap();
        }
    }
}

#[async_trait]
impl ContextStore for InMemoryContextStore {
    async fn get_or_create(&self, session_id: &str, current_query: &str) -> SessionContext {
        let slot = match self.slot(session_id) {
            Some(slot) => slot,
            None => {
                let mut sessions = self.sessions.write();
                sessions
                    .entry(session_id.to_string())
                    .or_insert_with(|| {
                        debug!(session_id, "creating session context");
                        Arc::new(Mutex::new(SessionContext::new(session_id, current_query)))
                    })
                    .clone()
            }
        };

        let mut session = slot.lock().await;
        session.current_query = current_query.to_string();
        session.clone()
    }

    async fn append_exchange(
        &self,
        session_id: &str,
        step: ConversationStep,
        decision: RoutingDecision,
    ) {
        let Some(slot) = self.slot(session_id) else {
            warn!(session_id, "append_exchange for unknown session; dropping");
            return;
        };

        let mut session = slot.lock().await;
        session.push_exchange(step, decision, self.max_history);
    }

    async fn clear(&self, session_id: &str) -> bool {
        self.sessions.write().remove(session_id).is_some()
    }

    async fn sweep_expired(&self, max_idle: Duration) -> usize {
        let candidates: Vec<(String, SessionSlot)> = {
            let sessions = self.sessions.read();
            sessions
                .iter()
                .map(|(id, slot)| (id.clone(), slot.clone()))
                .collect()
        };

        let max_idle = chrono::Duration::from_std(max_idle).unwrap_or(chrono::Duration::MAX);
        let cutoff = Utc::now() - max_idle;
        let mut removed = 0;

        for (id, slot) in candidates {
            // Hold the session mutex while deleting so a concurrent update
            // can't lose its append to a removed entry.
            let session = slot.lock().await;
            if session.last_activity_at < cutoff {
                self.sessions.write().remove(&id);
                removed += 1;
            }
        }

        if removed > 0 {
            debug!(removed, "swept expired sessions");
        }
        removed
    }

    async fn stats(&self, session_id: &str) -> Option<SessionStats> {
        let slot = self.slot(session_id)?;
        let session = slot.lock().await;
        Some(session.stats())
    }

    async fn active_count(&self) -> usize {
        self.sessions.read().len()
    }

    fn name(&self) -> &str {
        "in_memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn decision(agent: &str, intent: &str) -> RoutingDecision {
        RoutingDecision {
            selected_agent: agent.to_string(),
            confidence_scores: BTreeMap::new(),
            reasoning: String::new(),
            meets_threshold: true,
            analyzed_intent: intent.to_string(),
        }
    }

    fn step(message: &str, agent: &str) -> ConversationStep {
        ConversationStep {
            timestamp: Utc::now(),
            user_message: message.to_string(),
            agent_id: agent.to_string(),
            agent_response: format!("response to {message}"),
            routing_reason: String::new(),
        }
    }

    #[tokio::test]
    async fn get_or_create_returns_same_session() {
        let store = InMemoryContextStore::new(10);
        let first = store.get_or_create("s1", "first query").await;
        let second = store.get_or_create("s1", "second query").await;

        assert_eq!(first.session_id, second.session_id);
        assert_eq!(second.current_query, "second query");
        assert_eq!(store.active_count().await, 1);
    }

    #[tokio::test]
    async fn history_and_decisions_stay_in_lockstep() {
        let store = InMemoryContextStore::new(10);
        store.get_or_create("s1", "q").await;

        for i in 0..7 {
            store
                .append_exchange("s1", step(&format!("m{i}"), "a"), decision("a", "general_inquiry"))
                .await;
            let ctx = store.get_or_create("s1", "q").await;
            assert_eq!(ctx.conversation_history.len(), ctx.routing_decisions.len());
        }
    }

    #[tokio::test]
    async fn eleventh_exchange_evicts_the_first() {
        let store = InMemoryContextStore::new(10);
        store.get_or_create("s1", "q").await;

        for i in 0..11 {
            store
                .append_exchange("s1", step(&format!("m{i}"), "a"), decision("a", "general_inquiry"))
                .await;
        }

        let ctx = store.get_or_create("s1", "q").await;
        assert_eq!(ctx.conversation_history.len(), 10);
        assert_eq!(ctx.conversation_history[0].user_message, "m1");
        assert_eq!(ctx.conversation_history[9].user_message, "m10");
        assert_eq!(ctx.routing_decisions.len(), 10);
    }

    #[tokio::test]
    async fn append_to_unknown_session_is_a_noop() {
        let store = InMemoryContextStore::new(10);
        store
            .append_exchange("ghost", step("m", "a"), decision("a", "general_inquiry"))
            .await;
        assert_eq!(store.active_count().await, 0);
    }

    #[tokio::test]
    async fn clear_unknown_session_returns_false() {
        let store = InMemoryContextStore::new(10);
        assert!(!store.clear("unknown-id").await);

        store.get_or_create("known", "q").await;
        assert!(store.clear("known").await);
        assert!(!store.clear("known").await);
    }

    #[tokio::test]
    async fn sweep_removes_only_idle_sessions() {
        let store = InMemoryContextStore::new(10);
        store.get_or_create("idle-2h", "q").await;
        store.get_or_create("idle-10m", "q").await;

        store.backdate("idle-2h", Duration::from_secs(2 * 3600)).await;
        store.backdate("idle-10m", Duration::from_secs(10 * 60)).await;

        let removed = store.sweep_expired(Duration::from_secs(3600)).await;
        assert_eq!(removed, 1);
        assert_eq!(store.active_count().await, 1);
        assert!(store.stats("idle-10m").await.is_some());
        assert!(store.stats("idle-2h").await.is_none());
    }

    #[tokio::test]
    async fn stats_count_agent_switches() {
        let store = InMemoryContextStore::new(10);
        store.get_or_create("s1", "q").await;
        store
            .append_exchange("s1", step("m1", "data-scientist"), decision("data-scientist", "data_analysis"))
            .await;
        store
            .append_exchange("s1", step("m2", "business-analyst"), decision("business-analyst", "business_analysis"))
            .await;

        let stats = store.stats("s1").await.unwrap();
        assert_eq!(stats.message_count, 2);
        assert_eq!(stats.agent_switches, 1);
        assert_eq!(stats.current_agent.as_deref(), Some("business-analyst"));
    }

    #[tokio::test]
    async fn dominant_intent_is_the_mode() {
        let store = InMemoryContextStore::new(10);
        store.get_or_create("s1", "q").await;
        for intent in ["data_analysis", "data_analysis", "business_analysis"] {
            store
                .append_exchange("s1", step("m", "a"), decision("a", intent))
                .await;
        }

        let stats = store.stats("s1").await.unwrap();
        assert_eq!(stats.dominant_intent.as_deref(), Some("data_analysis"));
    }

    #[tokio::test]
    async fn concurrent_appends_do_not_lose_updates() {
        let store = Arc::new(InMemoryContextStore::new(100));
        store.get_or_create("s1", "q").await;

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .append_exchange(
                        "s1",
                        step(&format!("m{i}"), "a"),
                        decision("a", "general_inquiry"),
                    )
                    .await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let ctx = store.get_or_create("s1", "q").await;
        assert_eq!(ctx.conversation_history.len(), 20);
        assert_eq!(ctx.routing_decisions.len(), 20);
    }
}
