//! The routing engine: decision composer over analysis, scoring, context,
//! classification, and invocation.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::error::RouteError;
use super::prompt;
use super::traits::{Router, RouterStatus, RoutingAnalysis, RoutingResult, SpecialistSummary};
use crate::analysis::{Analyzer, QueryAnalysis};
use crate::classifier::{ClassifierClient, ClassifierVerdict};
use crate::context::{ContextSnapshot, ContextStore, ConversationStep, SessionStats};
use crate::invoker::SpecialistInvoker;
use crate::scoring::{RoutingDecision, Scorer};
use crate::specialists::SpecialistRegistry;

/// Intent label recorded when the remote classifier made the decision and
/// the local pipeline never ran.
pub const REMOTE_CLASSIFICATION: &str = "remote_classification";

/// Composes one routing decision per query and owns the order of operations:
/// validate, load context, classify (remote first, local on any remote
/// failure), guard the registry, build the prompt, invoke, then record the
/// exchange. Stateless between queries; all session state lives in the
/// [`ContextStore`].
pub struct RoutingEngine {
    registry: Arc<SpecialistRegistry>,
    analyzer: Box<dyn Analyzer>,
    scorer: Box<dyn Scorer>,
    store: Arc<dyn ContextStore>,
    classifier: Box<dyn ClassifierClient>,
    invoker: Box<dyn SpecialistInvoker>,
}

impl RoutingEngine {
    pub fn new(
        registry: Arc<SpecialistRegistry>,
        analyzer: Box<dyn Analyzer>,
        scorer: Box<dyn Scorer>,
        store: Arc<dyn ContextStore>,
        classifier: Box<dyn ClassifierClient>,
        invoker: Box<dyn SpecialistInvoker>,
    ) -> Self {
        Self {
            registry,
            analyzer,
            scorer,
            store,
            classifier,
            invoker,
        }
    }

    /// Turn a remote verdict into an analysis/decision pair, or `None` when
    /// the verdict cannot be trusted (unregistered target) and the local
    /// pipeline should decide instead.
    fn remote_decision(
        &self,
        message: &str,
        verdict: &ClassifierVerdict,
    ) -> Option<(QueryAnalysis, RoutingDecision)> {
        let target = if verdict.needs_clarification {
            self.registry.fallback_id()
        } else {
            verdict.target_specialist.as_str()
        };

        if self.registry.get(target).is_none() {
            warn!(
                target = %verdict.target_specialist,
                "remote classifier named an unregistered specialist; routing locally"
            );
            return None;
        }

        let mut confidence_scores: BTreeMap<String, f64> = self
            .registry
            .ids()
            .into_iter()
            .map(|id| (id, 0.0))
            .collect();
        confidence_scores.insert(target.to_string(), verdict.confidence);

        let reasoning = if verdict.needs_clarification {
            format!(
                "Remote classifier requested clarification; routed to {target} ({})",
                verdict.rationale
            )
        } else {
            format!(
                "Remote classifier selected {target} with confidence {:.2}: {}",
                verdict.confidence, verdict.rationale
            )
        };

        let mut analysis = QueryAnalysis::empty(message);
        analysis.analyzed_intent = REMOTE_CLASSIFICATION.to_string();

        let decision = RoutingDecision {
            selected_agent: target.to_string(),
            confidence_scores,
            reasoning,
            meets_threshold: true,
            analyzed_intent: REMOTE_CLASSIFICATION.to_string(),
        };

        Some((analysis, decision))
    }

    /// Steps after the decision: registry guard, prompt, invocation.
    async fn dispatch(
        &self,
        message: &str,
        session_id: &str,
        snapshot: &ContextSnapshot,
        decision: &RoutingDecision,
    ) -> Result<(String, String, String), RouteError> {
        let entry = self.registry.get(&decision.selected_agent).ok_or_else(|| {
            RouteError::Routing(format!(
                "selected specialist '{}' is not registered",
                decision.selected_agent
            ))
        })?;

        let switching = snapshot.current_agent.as_deref() != Some(entry.profile.id.as_str());
        let prompt = prompt::prepare(message, snapshot, switching);
        debug!(
            specialist = %entry.profile.id,
            switching,
            prompt_chars = prompt.len(),
            "invoking specialist"
        );

        let response = self
            .invoker
            .invoke(&entry.profile, &prompt, session_id)
            .await
            .map_err(|err| RouteError::Invocation(format!("{err:#}")))?;

        Ok((
            entry.profile.id.clone(),
            entry.profile.name.clone(),
            response,
        ))
    }

    /// The degraded response when anything after validation fails. The
    /// session history is deliberately left untouched.
    fn fallback_result(
        &self,
        session_id: &str,
        message: &str,
        analysis: &QueryAnalysis,
        error: &RouteError,
    ) -> RoutingResult {
        let fallback = self.registry.fallback();
        let confidence_scores: BTreeMap<String, f64> = self
            .registry
            .ids()
            .into_iter()
            .map(|id| (id, 0.0))
            .collect();

        RoutingResult {
            session_id: session_id.to_string(),
            handling_agent_id: fallback.profile.id.clone(),
            handling_agent_name: fallback.profile.name.clone(),
            response_text: format!(
                "Sorry, I could not route this request properly because {}. \
                 The {} can pick this up; your conversation history was left unchanged.",
                error.plain_cause(),
                fallback.profile.name
            ),
            routing_analysis: RoutingAnalysis {
                original_query: message.to_string(),
                analyzed_intent: analysis.analyzed_intent.clone(),
                confidence_scores,
                selected_agent: fallback.profile.id.clone(),
                reasoning: format!("Fallback after failure: {error}"),
                matched_keywords: analysis.matched_keywords.iter().cloned().collect(),
            },
            context_maintained: false,
        }
    }
}

#[async_trait]
impl Router for RoutingEngine {
    async fn start_session(&self, message: &str) -> Result<RoutingResult, RouteError> {
        let session_id = uuid::Uuid::new_v4().to_string();
        self.query(message, &session_id).await
    }

    async fn query(&self, message: &str, session_id: &str) -> Result<RoutingResult, RouteError> {
        if message.trim().is_empty() {
            return Err(RouteError::Validation("message must not be empty".into()));
        }
        if session_id.trim().is_empty() {
            return Err(RouteError::Validation(
                "session id must not be empty".into(),
            ));
        }

        let context = self.store.get_or_create(session_id, message).await;
        let snapshot = context.snapshot();

        let (analysis, decision) = match self.classifier.classify(message).await {
            Ok(verdict) => match self.remote_decision(message, &verdict) {
                Some(pair) => pair,
                None => self.local_pipeline(message, &context, &snapshot),
            },
            Err(err) => {
                debug!(error = %err, "remote classification unavailable; routing locally");
                self.local_pipeline(message, &context, &snapshot)
            }
        };

        info!(
            session = %session_id,
            specialist = %decision.selected_agent,
            intent = %analysis.analyzed_intent,
            meets_threshold = decision.meets_threshold,
            "routing decision"
        );

        match self.dispatch(message, session_id, &snapshot, &decision).await {
            Ok((agent_id, agent_name, response_text)) => {
                let step = ConversationStep {
                    timestamp: Utc::now(),
                    user_message: message.to_string(),
                    agent_id: agent_id.clone(),
                    agent_response: response_text.clone(),
                    routing_reason: decision.reasoning.clone(),
                };
                self.store
                    .append_exchange(session_id, step, decision.clone())
                    .await;

                Ok(RoutingResult {
                    session_id: session_id.to_string(),
                    handling_agent_id: agent_id,
                    handling_agent_name: agent_name,
                    response_text,
                    routing_analysis: RoutingAnalysis {
                        original_query: message.to_string(),
                        analyzed_intent: analysis.analyzed_intent.clone(),
                        confidence_scores: decision.confidence_scores,
                        selected_agent: decision.selected_agent,
                        reasoning: decision.reasoning,
                        matched_keywords: analysis.matched_keywords.iter().cloned().collect(),
                    },
                    context_maintained: true,
                })
            }
            Err(err) => {
                warn!(session = %session_id, error = %err, "routing degraded to fallback");
                Ok(self.fallback_result(session_id, message, &analysis, &err))
            }
        }
    }

    async fn status(&self) -> RouterStatus {
        RouterStatus {
            specialists: self
                .registry
                .iter()
                .map(|entry| SpecialistSummary {
                    id: entry.profile.id.clone(),
                    name: entry.profile.name.clone(),
                    description: entry.profile.description.clone(),
                    capabilities: entry.profile.capabilities.clone(),
                    confidence_threshold: entry.profile.confidence_threshold,
                })
                .collect(),
            active_session_count: self.store.active_count().await,
            fallback_specialist: self.registry.fallback_id().to_string(),
        }
    }

    async fn session_stats(&self, session_id: &str) -> Option<SessionStats> {
        self.store.stats(session_id).await
    }

    async fn clear_session(&self, session_id: &str) -> bool {
        self.store.clear(session_id).await
    }

    fn name(&self) -> &str {
        "engine"
    }
}

impl RoutingEngine {
    /// The engine's context store, shared with the background sweeper.
    pub fn context_store(&self) -> Arc<dyn ContextStore> {
        self.store.clone()
    }

    fn local_pipeline(
        &self,
        message: &str,
        context: &crate::context::SessionContext,
        snapshot: &ContextSnapshot,
    ) -> (QueryAnalysis, RoutingDecision) {
        let history: Vec<String> = context
            .conversation_history
            .iter()
            .map(|step| step.user_message.clone())
            .collect();
        let analysis = self.analyzer.analyze(message, &history);
        let decision = self.scorer.decide(&analysis, &self.registry, snapshot);
        (analysis, decision)
    }
}
