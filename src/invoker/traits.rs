//! Specialist invoker trait - delivers the prepared prompt to a backend.

use anyhow::Result;
use async_trait::async_trait;

use crate::specialists::SpecialistProfile;

/// Delivers the final prompt to the chosen specialist backend and returns
/// its text response. Failures surface as invocation errors the router
/// converts into a degraded fallback response.
#[async_trait]
pub trait SpecialistInvoker: Send + Sync {
    async fn invoke(
        &self,
        specialist: &SpecialistProfile,
        prompt: &str,
        session_id: &str,
    ) -> Result<String>;

    /// The name of this invoker implementation.
    fn name(&self) -> &str;
}
