//! Context-transfer prompt construction.
//!
//! When a query moves to a different specialist than the one currently
//! handling the session, the new specialist gets a briefing block ahead of
//! the raw query so the conversation does not restart from zero.

use crate::context::ContextSnapshot;

const TRANSFER_OPEN: &str = "=== CONVERSATION CONTEXT ===";
const TRANSFER_CLOSE: &str = "=== CURRENT REQUEST ===";

/// Longest excerpt of a prior message or response carried into a prompt.
const EXCERPT_CHARS: usize = 100;

/// Build the prompt handed to the specialist backend.
///
/// First turn (no prior exchanges) gets the raw query. A continuing turn
/// with the same specialist gets a one-line reminder of the previous
/// exchange. A handoff to a different specialist gets the full transfer
/// block: session summary plus up to the last three exchanges.
pub fn prepare(query: &str, snapshot: &ContextSnapshot, switching: bool) -> String {
    if snapshot.exchange_count == 0 {
        return query.to_string();
    }

    if !switching {
        let last = snapshot
            .recent_exchanges
            .last()
            .map(|step| {
                format!(
                    "Previously: \"{}\" -> {}\n\n",
                    truncate(&step.user_message),
                    truncate(&step.agent_response)
                )
            })
            .unwrap_or_default();
        return format!("{last}{query}");
    }

    let mut block = String::new();
    block.push_str(TRANSFER_OPEN);
    block.push('\n');
    block.push_str(&format!(
        "This conversation is being handed to you after {} prior exchange(s).\n",
        snapshot.exchange_count
    ));
    if let Some(agent) = &snapshot.current_agent {
        block.push_str(&format!("Previous specialist: {agent}\n"));
    }
    if let Some(intent) = &snapshot.dominant_intent {
        block.push_str(&format!("Dominant intent so far: {intent}\n"));
    }
    if !snapshot.recent_exchanges.is_empty() {
        block.push_str("Recent exchanges (oldest first):\n");
        for step in &snapshot.recent_exchanges {
            block.push_str(&format!(
                "- [{}] \"{}\" -> {}\n",
                step.agent_id,
                truncate(&step.user_message),
                truncate(&step.agent_response)
            ));
        }
    }
    block.push_str(TRANSFER_CLOSE);
    block.push('\n');
    block.push_str(query);
    block
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(EXCERPT_CHARS).collect();
    format!("{head}...")
}
