//! Session context store - bounded conversation history and routing memory.

pub mod in_memory;
pub mod traits;

pub use in_memory::InMemoryContextStore;
pub use traits::{
    ContextSnapshot, ContextStore, ConversationStep, SessionContext, SessionStats,
};

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

/// Create the default in-memory context store.
pub fn create_context_store(max_history: usize) -> Arc<dyn ContextStore> {
    Arc::new(InMemoryContextStore::new(max_history))
}

/// Spawn the periodic expiry sweep as a background task.
///
/// Runs forever; callers keep the handle to abort on shutdown.
pub fn spawn_sweeper(
    store: Arc<dyn ContextStore>,
    interval: Duration,
    max_idle: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so a fresh start
        // doesn't sweep before anything could expire.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = store.sweep_expired(max_idle).await;
            if removed > 0 {
                info!(removed, "expired idle sessions");
            }
        }
    })
}
