//! HTTP specialist invoker.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::traits::SpecialistInvoker;
use crate::specialists::SpecialistProfile;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvokeResponse {
    response_text: String,
}

/// Invoker that posts the prepared prompt to a backend service.
pub struct HttpInvoker {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpInvoker {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build invoker HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl SpecialistInvoker for HttpInvoker {
    async fn invoke(
        &self,
        specialist: &SpecialistProfile,
        prompt: &str,
        session_id: &str,
    ) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({
                "specialist": specialist.id,
                "prompt": prompt,
                "sessionId": session_id,
            }))
            .send()
            .await
            .with_context(|| format!("invocation of {} failed", specialist.id))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "specialist backend returned {status}: {}",
                body.chars().take(200).collect::<String>()
            );
        }

        let parsed: InvokeResponse = response
            .json()
            .await
            .context("specialist backend returned malformed response")?;
        Ok(parsed.response_text)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_backend_errors() {
        let invoker =
            HttpInvoker::new("http://127.0.0.1:9/invoke", Duration::from_millis(200)).unwrap();
        let specialist = crate::specialists::default_profiles().remove(0);
        assert!(invoker.invoke(&specialist, "prompt", "s1").await.is_err());
    }
}
