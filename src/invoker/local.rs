//! Local echo invoker - canned responses for offline and CLI use.

use anyhow::Result;
use async_trait::async_trait;

use super::traits::SpecialistInvoker;
use crate::specialists::SpecialistProfile;

/// Invoker that acknowledges in the specialist's voice without calling any
/// backend. Default when no invoker endpoint is configured; also the test
/// double of choice.
pub struct LocalEchoInvoker;

#[async_trait]
impl SpecialistInvoker for LocalEchoInvoker {
    async fn invoke(
        &self,
        specialist: &SpecialistProfile,
        prompt: &str,
        _session_id: &str,
    ) -> Result<String> {
        let excerpt: String = prompt.chars().take(120).collect();
        Ok(format!(
            "[{}] Taking this one. Working from: \"{excerpt}\"",
            specialist.name
        ))
    }

    fn name(&self) -> &str {
        "local_echo"
    }
}
